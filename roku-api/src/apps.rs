//! Installed-application documents (`query/apps`, `query/active-app`)

use serde::Serialize;
use xmltree::Element;

use crate::error::{ApiError, Result};
use crate::xml::{children_named, parse_document};

/// An installed channel/application as listed by the device
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct App {
    /// Channel id used by `launch/{id}` and `query/icon/{id}`
    pub id: String,
    /// Display name
    pub name: String,
    /// Wire attribute `type`, e.g. `appl` or `tvin`
    pub kind: String,
    pub version: String,
}

impl App {
    /// Read an `<app>` element. Missing attributes become empty strings.
    pub(crate) fn from_element(element: &Element) -> Self {
        let attr = |name: &str| element.attributes.get(name).cloned().unwrap_or_default();
        Self {
            id: attr("id"),
            name: element
                .get_text()
                .map(|text| text.into_owned())
                .unwrap_or_default(),
            kind: attr("type"),
            version: attr("version"),
        }
    }
}

/// Decode `query/apps`: one [`App`] per `<app>` child, in document order
pub(crate) fn parse_apps(xml: &str) -> Result<Vec<App>> {
    let root = parse_document(xml, "apps")?;
    Ok(children_named(&root, "app").map(App::from_element).collect())
}

/// Decode `query/active-app`.
///
/// Exactly one `<app>` child is required. An `<app>` without an `id` is the
/// device reporting that nothing is running (the home screen) and maps to
/// `None`. Other children such as `<screensaver>` are ignored.
pub(crate) fn parse_active_app(xml: &str, endpoint: &str) -> Result<Option<App>> {
    let root = parse_document(xml, "active-app")?;
    let apps: Vec<&Element> = children_named(&root, "app").collect();

    match apps.as_slice() {
        [app] => {
            let app = App::from_element(app);
            Ok(if app.id.is_empty() { None } else { Some(app) })
        }
        other => Err(ApiError::MalformedResponse {
            endpoint: endpoint.to_string(),
            element: "app",
            expected: 1,
            found: other.len(),
        }),
    }
}
