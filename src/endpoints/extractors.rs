use std::convert::Infallible;

use axum::{
    body::Bytes,
    extract::{FromRequest, Multipart, Request},
    http::header::CONTENT_TYPE,
};

/// Form field carrying the wizard's final choice
pub const INCOME_CHOICE_FIELD: &str = "income_choice";

const URLENCODED: &str = "application/x-www-form-urlencoded";
const MULTIPART: &str = "multipart/form-data";

/// Extractor for the submitted income choice.
///
/// Never rejects. Urlencoded and multipart bodies are read and the first
/// `income_choice` value wins. Any other content type, or a body that cannot
/// be read, yields `None`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IncomeChoice(pub Option<String>);

impl<S> FromRequest<S> for IncomeChoice
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let content_type = req
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(mime_essence)
            .unwrap_or_default();

        let choice = match content_type.as_str() {
            URLENCODED => match Bytes::from_request(req, state).await {
                Ok(body) => first_urlencoded_value(&body, INCOME_CHOICE_FIELD),
                Err(e) => {
                    tracing::debug!(error = %e, "Unreadable completion form body");
                    None
                }
            },
            MULTIPART => first_multipart_value(req, state).await,
            _ => None,
        };

        Ok(Self(choice))
    }
}

/// `type/subtype` without parameters, lowercased
fn mime_essence(value: &str) -> String {
    value
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase()
}

/// First value of `field` in an urlencoded body.
///
/// Malformed escapes and invalid UTF-8 are decoded lossily instead of failing.
pub fn first_urlencoded_value(body: &[u8], field: &str) -> Option<String> {
    body.split(|&b| b == b'&')
        .filter(|pair| !pair.is_empty())
        .find_map(|pair| {
            let mut parts = pair.splitn(2, |&b| b == b'=');
            let key = decode_component(parts.next().unwrap_or_default());
            (key == field).then(|| decode_component(parts.next().unwrap_or_default()))
        })
}

fn decode_component(raw: &[u8]) -> String {
    let spaced: Vec<u8> = raw
        .iter()
        .map(|&b| if b == b'+' { b' ' } else { b })
        .collect();
    String::from_utf8_lossy(&urlencoding::decode_binary(&spaced)).into_owned()
}

async fn first_multipart_value<S>(req: Request, state: &S) -> Option<String>
where
    S: Send + Sync,
{
    let mut multipart = match Multipart::from_request(req, state).await {
        Ok(multipart) => multipart,
        Err(e) => {
            tracing::debug!(error = %e, "Unreadable multipart completion form");
            return None;
        }
    };

    loop {
        match multipart.next_field().await {
            // File parts are uploads, not form values
            Ok(Some(field))
                if field.name() == Some(INCOME_CHOICE_FIELD) && field.file_name().is_none() =>
            {
                return field.text().await.ok();
            }
            Ok(Some(_)) => continue,
            Ok(None) => return None,
            Err(e) => {
                tracing::debug!(error = %e, "Malformed multipart completion form");
                return None;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_value_wins() {
        assert_eq!(
            first_urlencoded_value(
                b"income_choice=donation&income_choice=passive_income",
                INCOME_CHOICE_FIELD
            ),
            Some("donation".to_string())
        );
    }

    #[test]
    fn test_urlencoded_decoding() {
        assert_eq!(
            first_urlencoded_value(b"other=1&income_choice=deferred%5Fdonation", INCOME_CHOICE_FIELD),
            Some("deferred_donation".to_string())
        );
        assert_eq!(
            first_urlencoded_value(b"income_choice=a+b", INCOME_CHOICE_FIELD),
            Some("a b".to_string())
        );
        assert_eq!(
            first_urlencoded_value(b"income%5Fchoice=donation", INCOME_CHOICE_FIELD),
            Some("donation".to_string())
        );
    }

    #[test]
    fn test_bare_key_is_empty_value() {
        assert_eq!(
            first_urlencoded_value(b"income_choice", INCOME_CHOICE_FIELD),
            Some(String::new())
        );
    }

    #[test]
    fn test_missing_or_garbled_field() {
        assert_eq!(first_urlencoded_value(b"", INCOME_CHOICE_FIELD), None);
        assert_eq!(first_urlencoded_value(b"&&=&", INCOME_CHOICE_FIELD), None);
        assert_eq!(
            first_urlencoded_value(b"choice=donation", INCOME_CHOICE_FIELD),
            None
        );

        let lossy = first_urlencoded_value(b"income_choice=%FF%zz", INCOME_CHOICE_FIELD)
            .expect("field is present");
        assert!(lossy.ends_with("%zz"));
    }

    #[test]
    fn test_mime_essence() {
        assert_eq!(
            mime_essence("Application/X-WWW-Form-Urlencoded; charset=UTF-8"),
            URLENCODED
        );
        assert_eq!(mime_essence("multipart/form-data; boundary=x"), MULTIPART);
    }
}
