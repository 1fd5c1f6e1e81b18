//! Update request parameters.

use std::convert::Infallible;

use axum::extract::{Form, FromRequest, FromRequestParts, Query, Request};
use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};

/// Parameters of `POST /api/1/switchifier/update`.
///
/// Accepted both in the query string and in a form-encoded body. When a key
/// repeats, its first occurrence wins; body values win over query values.
/// Extraction never fails: unreadable sources count as empty, so the
/// secret check always runs before any input error is reported.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, IntoParams, ToSchema)]
#[into_params(parameter_in = Query)]
pub struct UpdateParams {
    /// Shared secret.
    #[serde(default)]
    pub secret: Option<String>,
    /// New switch value: `t…`/`1` for open, anything else for closed.
    #[serde(default)]
    pub value: Option<String>,
}

impl UpdateParams {
    /// Builds parameters from decoded key/value pairs, keeping the first
    /// value of each key.
    #[must_use]
    pub fn from_pairs(pairs: Vec<(String, String)>) -> Self {
        let mut params = Self::default();
        for (key, value) in pairs {
            let slot = match key.as_str() {
                "secret" => &mut params.secret,
                "value" => &mut params.value,
                _ => continue,
            };
            if slot.is_none() {
                *slot = Some(value);
            }
        }
        params
    }

    /// Merges two parameter sets, preferring values from `self`.
    #[must_use]
    pub fn or(self, fallback: Self) -> Self {
        Self {
            secret: self.secret.or(fallback.secret),
            value: self.value.or(fallback.value),
        }
    }
}

impl<S> FromRequest<S> for UpdateParams
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let (mut parts, body) = req.into_parts();

        let query = Query::<Vec<(String, String)>>::from_request_parts(&mut parts, state)
            .await
            .map(|Query(pairs)| Self::from_pairs(pairs))
            .unwrap_or_default();

        let form = Form::<Vec<(String, String)>>::from_request(Request::from_parts(parts, body), state)
            .await
            .map(|Form(pairs)| Self::from_pairs(pairs))
            .unwrap_or_default();

        Ok(form.or(query))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pairs(raw: &[(&str, &str)]) -> Vec<(String, String)> {
        raw.iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect()
    }

    #[test]
    fn body_values_win_over_query_values() {
        let body = UpdateParams {
            secret: Some("body".into()),
            value: None,
        };
        let query = UpdateParams {
            secret: Some("query".into()),
            value: Some("1".into()),
        };
        let merged = body.or(query);
        assert_eq!(merged.secret.as_deref(), Some("body"));
        assert_eq!(merged.value.as_deref(), Some("1"));
    }

    #[test]
    fn first_occurrence_of_a_key_wins() {
        let params = UpdateParams::from_pairs(pairs(&[
            ("secret", "first"),
            ("value", "t"),
            ("secret", "second"),
            ("value", "f"),
        ]));
        assert_eq!(params.secret.as_deref(), Some("first"));
        assert_eq!(params.value.as_deref(), Some("t"));
    }

    #[test]
    fn unknown_keys_are_ignored() {
        let params = UpdateParams::from_pairs(pairs(&[("extra", "x"), ("value", "1")]));
        assert_eq!(
            params,
            UpdateParams {
                secret: None,
                value: Some("1".into()),
            }
        );
    }
}
