//! Service DTOs. Create and update arrive as `multipart/form-data`
//! because they may carry a logo image.

use axum::extract::Multipart;
use chrono::{DateTime, Utc};
use clinic_http::{ApiError, FieldError, PageInfo, PageParams};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::model::ServiceItem;

/// Prices are accepted as decimal strings with exactly two fraction
/// digits, e.g. `350.00`.
fn parse_price(value: &str) -> Option<f64> {
    let (whole, frac) = value.split_once('.')?;
    if whole.is_empty()
        || frac.len() != 2
        || !whole.bytes().all(|b| b.is_ascii_digit())
        || !frac.bytes().all(|b| b.is_ascii_digit())
    {
        return None;
    }
    value.parse().ok()
}

#[derive(Debug)]
pub struct UploadedFile {
    pub name: String,
    pub bytes: Vec<u8>,
}

/// Validated form values, price and category already parsed.
#[derive(Debug)]
pub struct ServiceFields {
    pub name: String,
    pub category: i16,
    pub price: f64,
    pub description: String,
    pub others: String,
}

#[derive(Debug, Default)]
pub struct ServiceForm {
    pub name: Option<String>,
    pub category: Option<String>,
    pub price: Option<String>,
    pub description: Option<String>,
    pub others: Option<String>,
    pub logo: Option<UploadedFile>,
}

impl ServiceForm {
    pub async fn collect(mut multipart: Multipart) -> Result<Self, ApiError> {
        let mut form = Self::default();
        while let Some(field) = multipart
            .next_field()
            .await
            .map_err(|_| ApiError::Rule("Invalid parameters, check input".into()))?
        {
            let Some(name) = field.name().map(str::to_owned) else {
                continue;
            };
            if name == "logo" {
                let file_name = field.file_name().unwrap_or_default().to_owned();
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|_| ApiError::Rule("Invalid parameters, check input".into()))?;
                if !bytes.is_empty() {
                    form.logo = Some(UploadedFile {
                        name: file_name,
                        bytes: bytes.to_vec(),
                    });
                }
            } else {
                let value = field
                    .text()
                    .await
                    .map_err(|_| ApiError::Rule("Invalid parameters, check input".into()))?;
                match name.as_str() {
                    "name" => form.name = Some(value),
                    "category" => form.category = Some(value),
                    "price" => form.price = Some(value),
                    "description" => form.description = Some(value),
                    "others" => form.others = Some(value),
                    _ => {}
                }
            }
        }
        Ok(form)
    }

    /// Shared field checks; `logo_required` differs between create and
    /// update.
    pub fn validate(&self, logo_required: bool) -> Result<ServiceFields, Vec<FieldError>> {
        let mut errors = Vec::new();

        let name = match self.name.as_deref().map(str::trim) {
            Some(n) if !n.is_empty() => Some(n.to_owned()),
            _ => {
                errors.push(FieldError::new("name", "Name is required"));
                None
            }
        };

        let category = match self.category.as_deref().map(str::trim) {
            None | Some("") => {
                errors.push(FieldError::new("category", "Category is required"));
                None
            }
            Some(raw) => match raw.parse::<i16>() {
                Ok(c) => Some(c),
                Err(_) => {
                    errors.push(FieldError::new(
                        "category",
                        "Category should be a valid number",
                    ));
                    None
                }
            },
        };

        let price = match self.price.as_deref().map(str::trim) {
            None | Some("") => {
                errors.push(FieldError::new("price", "Price is required"));
                None
            }
            Some(raw) => match parse_price(raw) {
                Some(p) => Some(p),
                None => {
                    errors.push(FieldError::new("price", "Price should be a valid number"));
                    None
                }
            },
        };

        if logo_required && self.logo.is_none() {
            errors.push(FieldError::new("logo", "Logo is required"));
        }

        match (name, category, price) {
            (Some(name), Some(category), Some(price)) if errors.is_empty() => Ok(ServiceFields {
                name,
                category,
                price,
                description: self.description.clone().unwrap_or_default(),
                others: self.others.clone().unwrap_or_default(),
            }),
            _ => Err(errors),
        }
    }
}

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct ServiceListQuery {
    pub page: Option<u64>,
    pub limit: Option<u64>,
    pub name: Option<String>,
    pub category: Option<i16>,
}

impl ServiceListQuery {
    pub fn page(&self) -> PageParams {
        PageParams {
            page: self.page,
            limit: self.limit,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ServiceDto {
    pub id: i32,
    pub name: String,
    pub logo: String,
    pub category: i16,
    pub description: String,
    pub price: f64,
    pub others: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<ServiceItem> for ServiceDto {
    fn from(s: ServiceItem) -> Self {
        Self {
            id: s.id,
            name: s.name,
            logo: s.logo,
            category: s.category,
            description: s.description,
            price: s.price,
            others: s.others,
            created_at: s.created_at,
            updated_at: s.updated_at,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ServiceListData {
    pub services: Vec<ServiceDto>,
    pub pagination: PageInfo,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn price_must_have_two_fraction_digits() {
        assert_eq!(parse_price("350.00"), Some(350.00));
        assert_eq!(parse_price("0.99"), Some(0.99));
        for bad in ["350", "350.0", "350.000", "abc.00", ".50", "12.3x"] {
            assert!(parse_price(bad).is_none(), "{bad} should be invalid");
        }
    }

    #[test]
    fn create_form_requires_logo() {
        let form = ServiceForm {
            name: Some("X-Ray".into()),
            category: Some("2".into()),
            price: Some("350.00".into()),
            ..Default::default()
        };
        let errors = form.validate(true).unwrap_err();
        assert_eq!(errors[0].field, "logo");
        assert_eq!(errors[0].message, "Logo is required");

        assert!(form.validate(false).is_ok());
    }

    #[test]
    fn empty_form_reports_all_required_fields() {
        let errors = ServiceForm::default().validate(true).unwrap_err();
        let fields: Vec<_> = errors.iter().map(|e| e.field.as_str()).collect();
        assert_eq!(fields, vec!["name", "category", "price", "logo"]);
    }

    #[test]
    fn non_numeric_category_is_flagged() {
        let form = ServiceForm {
            name: Some("X-Ray".into()),
            category: Some("imaging".into()),
            price: Some("350.00".into()),
            ..Default::default()
        };
        let errors = form.validate(false).unwrap_err();
        assert_eq!(errors[0].message, "Category should be a valid number");
    }
}
