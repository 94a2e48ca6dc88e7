//! Multipart wine form parsing.

use axum::extract::Multipart;

use crate::adapters::http::error::AppError;
use crate::domain::cellar::WineForm;
use crate::ports::ImageUpload;

const IMAGE_FIELD: &str = "image";

/// Reads the add/edit wine form. An empty file input yields no image.
pub async fn read_wine_form(
    mut multipart: Multipart,
) -> Result<(WineForm, Option<ImageUpload>), AppError> {
    let mut form = WineForm::default();
    let mut image = None;

    while let Some(field) = multipart.next_field().await.map_err(bad_form)? {
        let name = field.name().unwrap_or_default().to_string();
        if name == IMAGE_FIELD {
            let content_type = field.content_type().unwrap_or_default().to_string();
            let bytes = field.bytes().await.map_err(bad_form)?;
            if !bytes.is_empty() {
                image = Some(ImageUpload::new(bytes.to_vec(), content_type));
            }
        } else {
            let value = field.text().await.map_err(bad_form)?;
            set_field(&mut form, &name, value);
        }
    }

    Ok((form, image))
}

fn bad_form(err: axum::extract::multipart::MultipartError) -> AppError {
    tracing::debug!(error = %err, "Unreadable multipart body");
    AppError::BadRequest("Error parsing form")
}

/// Unknown field names are ignored.
pub fn set_field(form: &mut WineForm, name: &str, value: String) {
    match name {
        "name" => form.name = value,
        "producer" => form.producer = value,
        "vintage" => form.vintage = value,
        "is_non_vintage" => form.is_non_vintage = Some(value),
        "grape" => form.grape = value,
        "country" => form.country = value,
        "region" => form.region = value,
        "quantity" => form.quantity = value,
        "price" => form.price = value,
        "abv" => form.abv = value,
        "location" => form.location = value,
        "rating" => form.rating = value,
        "drinking_window" => form.drinking_window = value,
        "notes" => form.notes = value,
        "type" => form.wine_type = value,
        "category" => form.category = value,
        "sub_category" => form.sub_category = value,
        "bottle_size" => form.bottle_size = value,
        _ => {}
    }
}
