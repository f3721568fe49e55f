use actix_multipart::Multipart;
use actix_web::{web, FromRequest};
use argon2::{
    password_hash::{PasswordHasher, SaltString},
    Argon2,
};
use futures_util::{future::LocalBoxFuture, TryStreamExt};
use rand::rngs::OsRng;
use serde_json::{Map, Value};
use validator::Validate;

use crate::{api::error, modules::media::Upload};

/// Upper bound for a plain text form field.
const MAX_TEXT_FIELD_SIZE: usize = 64 * 1024;

lazy_static::lazy_static! {
  static ref ARGON2: Argon2<'static> = Argon2::default();
}

pub fn hash_password(password: &str) -> Result<String, error::SystemError> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = ARGON2.hash_password(password.as_bytes(), &salt)?;
    Ok(hash.to_string())
}

/// Public URL of a stored image, if the entity has one.
pub fn image_url(route: &str, name: Option<&str>) -> Option<String> {
    name.map(|name| format!("{}/{}", route, name))
}

pub struct ValidatedJson<T>(pub T);

impl<T> FromRequest for ValidatedJson<T>
where
    T: Validate + serde::de::DeserializeOwned + 'static,
{
    type Error = error::Error;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(
        req: &actix_web::HttpRequest,
        payload: &mut actix_web::dev::Payload,
    ) -> Self::Future {
        let fut = web::Json::<T>::from_request(req, payload);

        Box::pin(async move {
            let json = fut.await.map_err(|e| error::Error::BadRequest(e.to_string().into()))?;
            let model = json.into_inner();
            model.validate().map_err(|e| error::Error::BadRequest(e.to_string().into()))?;
            Ok(ValidatedJson(model))
        })
    }
}

/// Text fields and the single file part of a multipart form.
#[derive(Debug, Default)]
pub struct UploadForm {
    fields: Map<String, Value>,
    pub file: Option<Upload>,
}

impl UploadForm {
    /// Deserializes the text fields into `T` and validates it.
    pub fn parse<T>(&self) -> Result<T, error::Error>
    where
        T: Validate + serde::de::DeserializeOwned,
    {
        let model: T = serde_json::from_value(Value::Object(self.fields.clone()))
            .map_err(|e| error::Error::BadRequest(e.to_string().into()))?;
        model.validate().map_err(|e| error::Error::BadRequest(e.to_string().into()))?;
        Ok(model)
    }
}

/// Reads every part of a multipart form. The part named `file_field` becomes the
/// upload, everything else must be UTF-8 text.
pub async fn read_upload_form(
    mut payload: Multipart,
    file_field: &str,
    max_file_size: usize,
) -> Result<UploadForm, error::Error> {
    let mut form = UploadForm::default();

    while let Some(mut field) =
        payload.try_next().await.map_err(|e| error::Error::bad_request(e.to_string()))?
    {
        let name = field
            .name()
            .map(str::to_owned)
            .ok_or_else(|| error::Error::bad_request("Missing field name"))?;
        let filename = field
            .content_disposition()
            .and_then(|cd| cd.get_filename())
            .map(str::to_owned);
        let content_type = field.content_type().map(|m| m.to_string());

        let is_file = name == file_field;
        let limit = if is_file { max_file_size } else { MAX_TEXT_FIELD_SIZE };

        let mut bytes = Vec::new();
        while let Some(chunk) =
            field.try_next().await.map_err(|e| error::Error::bad_request(e.to_string()))?
        {
            if bytes.len() + chunk.len() > limit {
                return Err(error::Error::payload_too_large(format!(
                    "Field '{}' exceeds maximum allowed size of {} bytes",
                    name, limit
                )));
            }
            bytes.extend_from_slice(&chunk);
        }

        if is_file {
            // browsers send an empty, unnamed part when no file was chosen
            match filename {
                Some(filename) if !(filename.is_empty() && bytes.is_empty()) => {
                    form.file = Some(Upload { filename, content_type, bytes });
                }
                _ => {}
            }
        } else {
            let text = String::from_utf8(bytes).map_err(|_| {
                error::Error::bad_request(format!("Field '{}' must be UTF-8 text", name))
            })?;
            form.fields.insert(name, Value::String(text));
        }
    }

    Ok(form)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(serde::Deserialize, Validate)]
    struct Sample {
        #[validate(length(min = 2))]
        name: String,
        count: Option<String>,
    }

    fn form(fields: &[(&str, &str)]) -> UploadForm {
        let mut form = UploadForm::default();
        for (k, v) in fields {
            form.fields.insert(k.to_string(), Value::String(v.to_string()));
        }
        form
    }

    #[test]
    fn parse_reads_text_fields() {
        let sample: Sample = form(&[("name", "bench"), ("count", "3")]).parse().unwrap();
        assert_eq!(sample.name, "bench");
        assert_eq!(sample.count.as_deref(), Some("3"));
    }

    #[test]
    fn parse_rejects_missing_and_invalid_fields() {
        assert!(matches!(form(&[]).parse::<Sample>(), Err(error::Error::BadRequest(_))));
        let invalid = form(&[("name", "x")]).parse::<Sample>();
        assert!(matches!(invalid, Err(error::Error::BadRequest(_))));
    }

    #[test]
    fn hash_password_produces_argon2_phc_string() {
        let hash = hash_password("secret-pass").unwrap();
        assert!(hash.starts_with("$argon2"));
        assert_ne!(hash, hash_password("secret-pass").unwrap());
    }

    #[test]
    fn image_url_joins_route_and_name() {
        let url = image_url("/api/photos/images", Some("a.jpg"));
        assert_eq!(url.as_deref(), Some("/api/photos/images/a.jpg"));
        assert_eq!(image_url("/api/photos/images", None), None);
    }
}
