//! The view sink: handlers describe *what* to show (a view name plus a key/value
//! model, or a redirect target) and this module turns it into an HTTP response.
//! Template rendering is left to whatever consumes the JSON document.

use axum::{
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use utoipa::ToSchema;

/// A rejected form field, e.g. `lastName` / `notFound` / "not found".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct FieldError {
    pub field: String,
    pub code: String,
    pub message: String,
}

/// A rejection not tied to a single field, e.g. a failed save.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct GlobalError {
    pub code: String,
    pub message: String,
}

/// Wire shape of a rendered view.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ViewDocument {
    pub view: String,
    #[schema(value_type = Object)]
    pub model: Map<String, Value>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub field_errors: Vec<FieldError>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub global_errors: Vec<GlobalError>,
}

#[derive(Debug, Clone)]
pub struct View {
    status: StatusCode,
    doc: ViewDocument,
}

impl View {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            status: StatusCode::OK,
            doc: ViewDocument {
                view: name.into(),
                model: Map::new(),
                field_errors: Vec::new(),
                global_errors: Vec::new(),
            },
        }
    }

    pub fn with_status(mut self, status: StatusCode) -> Self {
        self.status = status;
        self
    }

    /// Add a model attribute. Values that cannot be represented as JSON are logged and skipped.
    pub fn attr(mut self, key: &str, value: impl Serialize) -> Self {
        match serde_json::to_value(value) {
            Ok(v) => {
                self.doc.model.insert(key.to_string(), v);
            }
            Err(e) => tracing::error!(attribute = key, error = %e, "unserializable model attribute"),
        }
        self
    }

    pub fn reject_value(
        mut self,
        field: impl Into<String>,
        code: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        self.doc.field_errors.push(FieldError {
            field: field.into(),
            code: code.into(),
            message: message.into(),
        });
        self
    }

    pub fn reject_fields(mut self, errors: impl IntoIterator<Item = FieldError>) -> Self {
        self.doc.field_errors.extend(errors);
        self
    }

    pub fn reject(mut self, code: impl Into<String>, message: impl Into<String>) -> Self {
        self.doc.global_errors.push(GlobalError {
            code: code.into(),
            message: message.into(),
        });
        self
    }

    pub fn name(&self) -> &str {
        &self.doc.view
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn model(&self) -> &Map<String, Value> {
        &self.doc.model
    }

    pub fn field_errors(&self) -> &[FieldError] {
        &self.doc.field_errors
    }

    pub fn global_errors(&self) -> &[GlobalError] {
        &self.doc.global_errors
    }

    pub fn has_errors(&self) -> bool {
        !self.doc.field_errors.is_empty() || !self.doc.global_errors.is_empty()
    }

    pub fn into_document(self) -> ViewDocument {
        self.doc
    }
}

impl IntoResponse for View {
    fn into_response(self) -> Response {
        (self.status, Json(self.doc)).into_response()
    }
}

/// A raw redirect target such as `owners/7`. Rendered as `303 See Other` with an
/// absolute-path `Location` and a small JSON body echoing the target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Redirect {
    target: String,
}

impl Redirect {
    pub fn to(target: impl Into<String>) -> Self {
        Self {
            target: target.into(),
        }
    }

    pub fn target(&self) -> &str {
        &self.target
    }

    pub fn location(&self) -> String {
        if self.target.starts_with('/') {
            self.target.clone()
        } else {
            format!("/{}", self.target)
        }
    }
}

impl IntoResponse for Redirect {
    fn into_response(self) -> Response {
        let location = self.location();
        let mut resp = (
            StatusCode::SEE_OTHER,
            Json(serde_json::json!({ "redirect": self.target })),
        )
            .into_response();
        match HeaderValue::from_str(&location) {
            Ok(v) => {
                resp.headers_mut().insert(header::LOCATION, v);
            }
            Err(e) => {
                tracing::error!(location = %location, error = %e, "invalid redirect location");
                *resp.status_mut() = StatusCode::INTERNAL_SERVER_ERROR;
            }
        }
        resp
    }
}

/// Either outcome a form-backed handler can produce.
#[derive(Debug, Clone)]
pub enum ViewResponse {
    View(View),
    Redirect(Redirect),
}

impl From<View> for ViewResponse {
    fn from(v: View) -> Self {
        Self::View(v)
    }
}

impl From<Redirect> for ViewResponse {
    fn from(r: Redirect) -> Self {
        Self::Redirect(r)
    }
}

impl IntoResponse for ViewResponse {
    fn into_response(self) -> Response {
        match self {
            Self::View(v) => v.into_response(),
            Self::Redirect(r) => r.into_response(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn view_collects_model_and_errors() {
        let v = View::new("owners/findOwners")
            .attr("owner", serde_json::json!({ "lastName": "Zzz" }))
            .reject_value("lastName", "notFound", "not found");

        assert_eq!(v.name(), "owners/findOwners");
        assert_eq!(v.model()["owner"]["lastName"], "Zzz");
        assert!(v.has_errors());
        assert_eq!(v.field_errors()[0].code, "notFound");
        assert!(v.global_errors().is_empty());
    }

    #[test]
    fn view_document_uses_camel_case_and_skips_empty_errors() {
        let doc = View::new("vets/vetList").attr("currentPage", 1).into_document();
        let json = serde_json::to_value(&doc).unwrap();
        assert_eq!(json["view"], "vets/vetList");
        assert_eq!(json["model"]["currentPage"], 1);
        assert!(json.get("fieldErrors").is_none());
        assert!(json.get("globalErrors").is_none());
    }

    #[test]
    fn redirect_sets_see_other_and_location() {
        let resp = Redirect::to("owners/7").into_response();
        assert_eq!(resp.status(), StatusCode::SEE_OTHER);
        assert_eq!(resp.headers()[header::LOCATION], "/owners/7");
    }

    #[test]
    fn redirect_keeps_absolute_targets() {
        assert_eq!(Redirect::to("/owners/7").location(), "/owners/7");
    }

    #[test]
    fn view_status_is_propagated() {
        let resp = View::new("owners/createOrUpdateOwnerForm")
            .with_status(StatusCode::UNPROCESSABLE_ENTITY)
            .into_response();
        assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }
}
