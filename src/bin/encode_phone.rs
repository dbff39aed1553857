use clap::Parser;
use cv_forge::core::phone;

const USAGE: &str = "\
Phone Number Encoder

Usage : encode-phone <phone>

Example:
  encode-phone 1234567890

Notes:
  - digits only
  - no country code
  - no special characters (spaces, dashes, parentheses)";

/// Prints the stored form of a phone number for pasting into cv.json.
#[derive(Parser)]
#[command(name = "encode-phone", disable_help_flag = true)]
struct Args {
    phone: Option<String>,

    #[arg(short, long)]
    help: bool,
}

fn validate_input(phone: Option<&str>) -> Result<&str, &'static str> {
    let Some(phone) = phone.filter(|p| !p.is_empty()) else {
        return Err("Phone number is required");
    };
    if !phone.chars().all(|c| c.is_ascii_digit()) {
        return Err("Phone number must contain only digits (0-9)");
    }
    if phone.len() != phone::PHONE_LENGTH {
        return Err("Phone number must be exactly 10 digits");
    }
    Ok(phone)
}

fn main() {
    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(_) => {
            eprintln!("Error: Expected a single phone number argument");
            println!("{}", USAGE);
            std::process::exit(1);
        }
    };

    if args.help {
        println!("{}", USAGE);
        return;
    }

    let encoded = validate_input(args.phone.as_deref())
        .map_err(str::to_string)
        .and_then(|phone| phone::encode_as_display_string(phone).map_err(|e| e.to_string()));

    match encoded {
        Ok(line) => println!("{}", line),
        Err(message) => {
            eprintln!("Error: {}", message);
            println!("{}", USAGE);
            std::process::exit(1);
        }
    }
}
