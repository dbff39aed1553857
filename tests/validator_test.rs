use cv_forge::{CvDocument, CvError, CvValidator};
use serde_json::{json, Value};

fn template() -> Value {
    serde_json::from_str(include_str!("../data/cv.template.json")).unwrap()
}

fn validator() -> CvValidator {
    CvValidator::with_current_year(2026)
}

#[test]
fn test_bundled_template_is_valid() {
    assert!(validator().validate(&template()).is_ok());

    let cv = CvDocument::from_value(template(), &validator()).unwrap();
    assert_eq!(cv.name, "Jane Doe");
    assert_eq!(cv.experience.len(), 2);
    assert_eq!(cv.experience[1].location.url.as_deref(), Some("https://maps.example.com/?q=Berlin"));
}

#[test]
fn test_missing_fields_are_listed_in_document_order() {
    let mut data = template();
    let root = data.as_object_mut().unwrap();
    root.remove("education");
    root.remove("contacts");

    let error = validator().validate(&data).unwrap_err();
    assert_eq!(error.message, "Missing required fields: contacts, education");
    assert_eq!(error.field, "requiredFields");
    assert_eq!(error.value, json!(["contacts", "education"]));
}

#[test]
fn test_since_before_1900_is_rejected() {
    let mut data = template();
    data["summary"]["since"] = json!(1899);

    let error = validator().validate(&data).unwrap_err();
    assert_eq!(error.field, "summary.since");
    assert_eq!(error.value, json!(1899));
}

#[test]
fn test_first_failure_wins() {
    let mut data = template();
    data["name"] = json!("");
    data["experience"][0]["startDate"] = json!("2020/01");

    let error = validator().validate(&data).unwrap_err();
    assert_eq!(error.field, "name");
}

#[test]
fn test_experience_dates_report_their_path() {
    let mut data = template();
    data["experience"][1]["endDate"] = json!("2020-13");

    let error = validator().validate(&data).unwrap_err();
    assert_eq!(error.field, "experience[1].endDate");
    assert_eq!(error.message, "End date at index 1 must be YYYY-MM format");
}

#[test]
fn test_validation_is_repeatable() {
    let mut data = template();
    data["contacts"]["phone"] = json!(["1", "2", "3"]);

    let first = validator().validate(&data).unwrap_err();
    let second = validator().validate(&data).unwrap_err();
    assert_eq!(first, second);
    assert_eq!(first.field, "contacts.phone");
}

#[test]
fn test_typed_document_surfaces_validation_error() {
    let result = CvDocument::from_json_str(r#"{"name": "x"}"#, &validator());
    match result {
        Err(CvError::Validation(e)) => assert_eq!(e.field, "requiredFields"),
        other => panic!("unexpected result: {:?}", other),
    }
}

fn rejected(mutate: impl FnOnce(&mut Value)) -> cv_forge::CvValidationError {
    let mut data = template();
    mutate(&mut data);
    validator().validate(&data).unwrap_err()
}

#[test]
fn test_valid_document_is_untouched_by_validation() {
    let data = template();
    let before = data.clone();

    assert!(validator().validate(&data).is_ok());
    assert!(validator().validate(&data).is_ok());
    assert_eq!(data, before);
}

#[test]
fn test_since_accepts_whole_float_years() {
    let mut data = template();
    data["summary"]["since"] = json!(2000.0);
    assert!(validator().validate(&data).is_ok());
    assert_eq!(CvDocument::from_value(data, &validator()).unwrap().summary.since, 2000);

    let error = rejected(|d| d["summary"]["since"] = json!(2000.5));
    assert_eq!(error.field, "summary.since");
}

#[test]
fn test_email_rules() {
    let error = rejected(|d| d["contacts"]["email"] = json!(["com", "example"]));
    assert_eq!(error.field, "contacts.email");
    assert_eq!(
        error.message,
        "Email must be an array of 3 strings [domain, subdomain, username]"
    );

    let error = rejected(|d| d["contacts"]["email"] = json!(["com", "", "jane"]));
    assert_eq!(error.field, "contacts.email");
    assert_eq!(error.message, "All email parts must be non-empty strings");
}

#[test]
fn test_phone_elements_must_be_single_digits() {
    let error = rejected(|d| {
        d["contacts"]["phone"] = json!(["12", "2", "0", "5", "4", "3", "6", "8", "7", "9"])
    });
    assert_eq!(error.field, "contacts.phone");
    assert_eq!(error.message, "All phone parts must be single digit strings");
}

#[test]
fn test_cv_and_location_rules() {
    let error = rejected(|d| d["contacts"]["cv"] = json!("not a url"));
    assert_eq!(error.field, "contacts.cv");
    assert_eq!(error.value, json!("not a url"));

    let error = rejected(|d| d["contacts"]["location"] = json!("Berlin"));
    assert_eq!(error.field, "contacts.location");

    let error = rejected(|d| d["contacts"]["location"]["title"] = json!("  "));
    assert_eq!(error.field, "contacts.location.title");
}

#[test]
fn test_link_rules() {
    let error = rejected(|d| d["contacts"]["links"] = json!({}));
    assert_eq!(error.field, "contacts.links");

    let error = rejected(|d| d["contacts"]["links"][1] = json!("https://example.com"));
    assert_eq!(error.field, "contacts.links[1]");
    assert_eq!(error.message, "Link at index 1 must be an object");

    let error = rejected(|d| d["contacts"]["links"][0]["url"] = json!("github dot com"));
    assert_eq!(error.field, "contacts.links[0].url");

    let error = rejected(|d| d["contacts"]["links"][1]["title"] = json!(""));
    assert_eq!(error.field, "contacts.links[1].title");
}

#[test]
fn test_experience_missing_keys_reported_together() {
    let error = rejected(|d| {
        let item = d["experience"][0].as_object_mut().unwrap();
        item.remove("role");
        item.remove("achievements");
    });
    assert_eq!(error.field, "experience[0]");
    assert_eq!(error.value, json!(["role", "achievements"]));
    assert_eq!(error.message, "Experience item 0 missing fields: role, achievements");
}

#[test]
fn test_experience_item_rules() {
    let error = rejected(|d| d["experience"][0]["role"] = json!(""));
    assert_eq!(error.field, "experience[0].role");

    let error = rejected(|d| d["experience"][1]["company"] = json!("Initech"));
    assert_eq!(error.field, "experience[1].company");

    let error = rejected(|d| d["experience"][1]["company"] = json!({ "url": "https://initech.example" }));
    assert_eq!(error.field, "experience[1].company.name");

    let error = rejected(|d| d["experience"][0]["achievements"] = json!(["Shipped it", ""]));
    assert_eq!(error.field, "experience[0].achievements");
    assert_eq!(
        error.message,
        "All achievements at index 0 must be non-empty strings"
    );
}

#[test]
fn test_expertise_skill_rules() {
    let error = rejected(|d| d["expertise"][1]["skills"] = json!([]));
    assert_eq!(error.field, "expertise[1].skills");
    assert_eq!(error.message, "Skills at index 1 must be non-empty array");

    let error = rejected(|d| d["expertise"][0]["skills"] = json!(["Rust", " "]));
    assert_eq!(error.field, "expertise[0].skills");
    assert_eq!(error.message, "All skills at index 0 must be non-empty strings");
}

#[test]
fn test_education_rules() {
    let error = rejected(|d| d["education"][0]["place"] = json!(""));
    assert_eq!(error.field, "education[0].place");

    let error = rejected(|d| d["education"][0]["additionalInfo"] = json!("Honours"));
    assert_eq!(error.field, "education[0].additionalInfo");
    assert_eq!(error.value, json!("Honours"));
}
