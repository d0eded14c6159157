//! Raw-input validation for the product write paths.
//!
//! HTML forms deliver every value as a string, so the write endpoints
//! accept a [`ProductForm`] and run it through [`validate_create`] or
//! [`validate_update`] before anything touches the store. Validation
//! never bails on the first problem: each invalid field contributes an
//! error, in field-declaration order, so a client can render the whole
//! set at once.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::ValidationErrors;

use crate::models::{Category, CreateProduct, UpdateProduct};

/// Field length and count limits, mirrored by the `Validate` derives
/// on [`CreateProduct`] and [`UpdateProduct`].
pub const NAME_MIN: usize = 3;
pub const NAME_MAX: usize = 100;
pub const DESCRIPTION_MIN: usize = 1;
pub const DESCRIPTION_MAX: usize = 1000;
pub const MAX_IMAGES: usize = 5;

/// Field order used when reporting validation errors
const FIELD_ORDER: [&str; 7] = [
    "name",
    "description",
    "price",
    "stock",
    "category",
    "images",
    "featured",
];

/// Raw product input as submitted by a form
///
/// Every scalar arrives as an optional string; `images` collects the
/// repeated `images` keys of the form body.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct ProductForm {
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<String>,
    pub stock: Option<String>,
    pub category: Option<String>,
    #[serde(default)]
    pub images: Vec<String>,
    pub featured: Option<String>,
}

/// A single field-level validation failure
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// Validate raw input for product creation
///
/// Returns a fully-populated [`CreateProduct`] with defaults applied
/// (`stock` 0, `images` empty, `featured` false), or every field error
/// found, ordered by field declaration.
pub fn validate_create(form: &ProductForm) -> Result<CreateProduct, Vec<FieldError>> {
    let mut errors = Vec::new();

    let name = check_name(form.name.as_deref())
        .map_err(|e| errors.push(e))
        .ok();
    let description = check_description(form.description.as_deref())
        .map_err(|e| errors.push(e))
        .ok();
    let price = check_price(form.price.as_deref())
        .map_err(|e| errors.push(e))
        .ok();
    let stock = check_stock(form.stock.as_deref())
        .map_err(|e| errors.push(e))
        .ok();
    let category = check_category(form.category.as_deref())
        .map_err(|e| errors.push(e))
        .ok();
    let images = check_images(&form.images)
        .map_err(|e| errors.push(e))
        .ok();
    let featured = is_truthy(form.featured.as_deref());

    match (name, description, price, stock, category, images) {
        (Some(name), Some(description), Some(price), Some(stock), Some(category), Some(images))
            if errors.is_empty() =>
        {
            Ok(CreateProduct {
                name,
                description,
                price,
                stock,
                category,
                images,
                featured,
            })
        }
        _ => Err(errors),
    }
}

/// Validate raw input for a partial update
///
/// Absent fields stay absent. A supplied but invalid field is an
/// error; a blank `stock` and an `images` list whose entries are all
/// blank are treated as not supplied at all, so an update can never
/// silently reset either to its creation default.
pub fn validate_update(form: &ProductForm) -> Result<UpdateProduct, Vec<FieldError>> {
    let mut errors = Vec::new();
    let mut update = UpdateProduct::default();

    if form.name.is_some() {
        match check_name(form.name.as_deref()) {
            Ok(name) => update.name = Some(name),
            Err(e) => errors.push(e),
        }
    }
    if form.description.is_some() {
        match check_description(form.description.as_deref()) {
            Ok(description) => update.description = Some(description),
            Err(e) => errors.push(e),
        }
    }
    if form.price.is_some() {
        match check_price(form.price.as_deref()) {
            Ok(price) => update.price = Some(price),
            Err(e) => errors.push(e),
        }
    }
    // Edit forms submit stock even when untouched; blank means absent,
    // so an empty value never resets the stored count to the default
    if form.stock.as_deref().is_some_and(|raw| !raw.trim().is_empty()) {
        match check_stock(form.stock.as_deref()) {
            Ok(stock) => update.stock = Some(stock),
            Err(e) => errors.push(e),
        }
    }
    if form.category.is_some() {
        match check_category(form.category.as_deref()) {
            Ok(category) => update.category = Some(category),
            Err(e) => errors.push(e),
        }
    }
    if !form.images.is_empty() {
        match check_images(&form.images) {
            // All-blank entries filter down to nothing; drop the field
            Ok(images) if images.is_empty() => {}
            Ok(images) => update.images = Some(images),
            Err(e) => errors.push(e),
        }
    }
    if let Some(raw) = form.featured.as_deref() {
        update.featured = Some(is_truthy(Some(raw)));
    }

    if errors.is_empty() {
        Ok(update)
    } else {
        Err(errors)
    }
}

/// Convert `validator` derive output into ordered field errors
///
/// Used when a typed payload bypasses the form path and is re-checked
/// at the persistence boundary.
pub fn field_errors_from(errors: &ValidationErrors) -> Vec<FieldError> {
    let field_errors = errors.field_errors();
    let mut out = Vec::new();
    for field in FIELD_ORDER {
        if let Some(violations) = field_errors.get(field) {
            for violation in violations.iter() {
                let message = violation
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| format!("{field} is invalid"));
                out.push(FieldError::new(field, message));
            }
        }
    }
    out
}

fn check_name(raw: Option<&str>) -> Result<String, FieldError> {
    let trimmed = raw.unwrap_or("").trim();
    let len = trimmed.chars().count();
    if (NAME_MIN..=NAME_MAX).contains(&len) {
        Ok(trimmed.to_string())
    } else {
        Err(FieldError::new(
            "name",
            format!("name must be between {NAME_MIN} and {NAME_MAX} characters"),
        ))
    }
}

fn check_description(raw: Option<&str>) -> Result<String, FieldError> {
    let trimmed = raw.unwrap_or("").trim();
    let len = trimmed.chars().count();
    if (DESCRIPTION_MIN..=DESCRIPTION_MAX).contains(&len) {
        Ok(trimmed.to_string())
    } else {
        Err(FieldError::new(
            "description",
            format!("description must be between {DESCRIPTION_MIN} and {DESCRIPTION_MAX} characters"),
        ))
    }
}

fn check_price(raw: Option<&str>) -> Result<f64, FieldError> {
    let err = || FieldError::new("price", "price must be a non-negative number");
    let trimmed = raw.unwrap_or("").trim();
    if trimmed.is_empty() {
        return Err(err());
    }
    match trimmed.parse::<f64>() {
        Ok(price) if price.is_finite() && price >= 0.0 => Ok(price),
        _ => Err(err()),
    }
}

fn check_stock(raw: Option<&str>) -> Result<i32, FieldError> {
    let trimmed = raw.unwrap_or("").trim();
    // Absent stock defaults to zero
    if trimmed.is_empty() {
        return Ok(0);
    }
    match trimmed.parse::<i32>() {
        Ok(stock) if stock >= 0 => Ok(stock),
        _ => Err(FieldError::new(
            "stock",
            "stock must be a non-negative integer",
        )),
    }
}

fn check_category(raw: Option<&str>) -> Result<Category, FieldError> {
    raw.unwrap_or("").trim().parse::<Category>().map_err(|_| {
        let allowed = Category::ALL
            .iter()
            .map(|c| c.to_string())
            .collect::<Vec<_>>()
            .join(", ");
        FieldError::new("category", format!("category must be one of: {allowed}"))
    })
}

fn check_images(raw: &[String]) -> Result<Vec<String>, FieldError> {
    let images: Vec<String> = raw
        .iter()
        .map(|image| image.trim())
        .filter(|image| !image.is_empty())
        .map(str::to_string)
        .collect();
    if images.len() <= MAX_IMAGES {
        Ok(images)
    } else {
        Err(FieldError::new(
            "images",
            format!("a product can have at most {MAX_IMAGES} images"),
        ))
    }
}

fn is_truthy(raw: Option<&str>) -> bool {
    matches!(raw.map(str::trim), Some("true") | Some("on"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use validator::Validate;

    fn valid_form() -> ProductForm {
        ProductForm {
            name: Some("Espresso Machine".to_string()),
            description: Some("Pulls a proper shot".to_string()),
            price: Some("249.99".to_string()),
            stock: Some("12".to_string()),
            category: Some("home".to_string()),
            images: vec!["img-1".to_string(), "img-2".to_string()],
            featured: Some("true".to_string()),
        }
    }

    #[test]
    fn create_accepts_valid_input() {
        let created = validate_create(&valid_form()).unwrap();
        assert_eq!(created.name, "Espresso Machine");
        assert_eq!(created.price, 249.99);
        assert_eq!(created.stock, 12);
        assert_eq!(created.category, Category::Home);
        assert_eq!(created.images, vec!["img-1", "img-2"]);
        assert!(created.featured);
    }

    #[test]
    fn create_applies_defaults() {
        let form = ProductForm {
            stock: None,
            images: vec![],
            featured: None,
            ..valid_form()
        };
        let created = validate_create(&form).unwrap();
        assert_eq!(created.stock, 0);
        assert!(created.images.is_empty());
        assert!(!created.featured);
    }

    #[test]
    fn create_trims_name_and_description() {
        let form = ProductForm {
            name: Some("  Espresso Machine  ".to_string()),
            description: Some("  Pulls a proper shot ".to_string()),
            ..valid_form()
        };
        let created = validate_create(&form).unwrap();
        assert_eq!(created.name, "Espresso Machine");
        assert_eq!(created.description, "Pulls a proper shot");
    }

    #[test]
    fn create_rejects_whitespace_only_name() {
        let form = ProductForm {
            name: Some("   ab   ".to_string()),
            ..valid_form()
        };
        let errors = validate_create(&form).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, "name");
    }

    #[test]
    fn create_collects_all_errors_in_field_order() {
        let form = ProductForm {
            name: Some("ab".to_string()),
            description: Some("   ".to_string()),
            price: Some("-1".to_string()),
            stock: Some("2.5".to_string()),
            category: Some("garden".to_string()),
            images: (0..6).map(|i| format!("img-{i}")).collect(),
            featured: None,
        };
        let errors = validate_create(&form).unwrap_err();
        let fields: Vec<&str> = errors.iter().map(|e| e.field.as_str()).collect();
        assert_eq!(
            fields,
            vec!["name", "description", "price", "stock", "category", "images"]
        );
    }

    #[test]
    fn create_rejects_missing_required_fields() {
        let errors = validate_create(&ProductForm::default()).unwrap_err();
        let fields: Vec<&str> = errors.iter().map(|e| e.field.as_str()).collect();
        assert_eq!(
            fields,
            vec!["name", "description", "price", "category"]
        );
    }

    #[test]
    fn create_rejects_non_numeric_price() {
        for raw in ["abc", "NaN", "inf", ""] {
            let form = ProductForm {
                price: Some(raw.to_string()),
                ..valid_form()
            };
            let errors = validate_create(&form).unwrap_err();
            assert_eq!(errors[0].field, "price", "price {raw:?} should fail");
        }
    }

    #[test]
    fn create_accepts_zero_price_and_stock() {
        let form = ProductForm {
            price: Some("0".to_string()),
            stock: Some("0".to_string()),
            ..valid_form()
        };
        let created = validate_create(&form).unwrap();
        assert_eq!(created.price, 0.0);
        assert_eq!(created.stock, 0);
    }

    #[test]
    fn create_filters_blank_images_before_counting() {
        let mut images = vec!["  ".to_string(), String::new()];
        images.extend((0..5).map(|i| format!("img-{i}")));
        let form = ProductForm {
            images,
            ..valid_form()
        };
        let created = validate_create(&form).unwrap();
        assert_eq!(created.images.len(), 5);
    }

    #[test]
    fn create_rejects_six_images() {
        let form = ProductForm {
            images: (0..6).map(|i| format!("img-{i}")).collect(),
            ..valid_form()
        };
        let errors = validate_create(&form).unwrap_err();
        assert_eq!(errors[0].field, "images");
    }

    #[test]
    fn create_featured_only_truthy_for_true_and_on() {
        for (raw, expected) in [
            (Some("true"), true),
            (Some("on"), true),
            (Some("yes"), false),
            (Some("1"), false),
            (Some("false"), false),
            (None, false),
        ] {
            let form = ProductForm {
                featured: raw.map(str::to_string),
                ..valid_form()
            };
            assert_eq!(validate_create(&form).unwrap().featured, expected);
        }
    }

    #[test]
    fn create_boundary_lengths() {
        let form = ProductForm {
            name: Some("abc".to_string()),
            description: Some("x".repeat(1000)),
            ..valid_form()
        };
        assert!(validate_create(&form).is_ok());

        let form = ProductForm {
            name: Some("x".repeat(101)),
            ..valid_form()
        };
        assert!(validate_create(&form).is_err());
    }

    #[test]
    fn create_output_passes_derive_constraints() {
        let created = validate_create(&valid_form()).unwrap();
        assert!(created.validate().is_ok());
    }

    #[test]
    fn update_keeps_absent_fields_absent() {
        let form = ProductForm {
            price: Some("19.99".to_string()),
            ..Default::default()
        };
        let update = validate_update(&form).unwrap();
        assert_eq!(update.price, Some(19.99));
        assert!(update.name.is_none());
        assert!(update.images.is_none());
        assert!(update.featured.is_none());
    }

    #[test]
    fn update_treats_blank_stock_as_absent() {
        for raw in ["", "   "] {
            let form = ProductForm {
                stock: Some(raw.to_string()),
                ..Default::default()
            };
            let update = validate_update(&form).unwrap();
            assert!(update.stock.is_none(), "stock {raw:?} should be dropped");
        }
    }

    #[test]
    fn update_rejects_supplied_invalid_fields() {
        let form = ProductForm {
            name: Some("ab".to_string()),
            price: Some("-5".to_string()),
            ..Default::default()
        };
        let errors = validate_update(&form).unwrap_err();
        let fields: Vec<&str> = errors.iter().map(|e| e.field.as_str()).collect();
        assert_eq!(fields, vec!["name", "price"]);
    }

    #[test]
    fn update_drops_images_that_filter_to_empty() {
        let form = ProductForm {
            images: vec!["  ".to_string(), String::new()],
            ..Default::default()
        };
        let update = validate_update(&form).unwrap();
        assert!(update.images.is_none());
    }

    #[test]
    fn update_keeps_non_blank_images() {
        let form = ProductForm {
            images: vec!["img-1".to_string(), " ".to_string()],
            ..Default::default()
        };
        let update = validate_update(&form).unwrap();
        assert_eq!(update.images, Some(vec!["img-1".to_string()]));
    }

    #[test]
    fn update_empty_form_is_empty_update() {
        let update = validate_update(&ProductForm::default()).unwrap();
        assert!(update.is_empty());
    }

    #[test]
    fn update_featured_false_is_explicit() {
        let form = ProductForm {
            featured: Some("false".to_string()),
            ..Default::default()
        };
        let update = validate_update(&form).unwrap();
        assert_eq!(update.featured, Some(false));
    }

    #[test]
    fn derive_errors_come_out_in_field_order() {
        let payload = CreateProduct {
            name: "ab".to_string(),
            description: String::new(),
            price: -1.0,
            stock: -1,
            category: Category::Other,
            images: (0..6).map(|i| format!("img-{i}")).collect(),
            featured: false,
        };
        let errors = field_errors_from(&payload.validate().unwrap_err());
        let fields: Vec<&str> = errors.iter().map(|e| e.field.as_str()).collect();
        assert_eq!(
            fields,
            vec!["name", "description", "price", "stock", "images"]
        );
    }
}
