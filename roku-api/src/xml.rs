//! XML helpers shared by the ECP document parsers

use xmltree::Element;

use crate::error::{ApiError, Result};

/// Parse a response body and check its root element name
pub(crate) fn parse_document(xml: &str, root: &str) -> Result<Element> {
    let element = Element::parse(xml.as_bytes())
        .map_err(|e| ApiError::ParseError(format!("Invalid XML: {}", e)))?;

    if element.name != root {
        return Err(ApiError::ParseError(format!(
            "Expected <{}> root element, found <{}>",
            root, element.name
        )));
    }
    Ok(element)
}

/// Direct child elements named `name`
pub(crate) fn children_named<'a>(
    element: &'a Element,
    name: &'a str,
) -> impl Iterator<Item = &'a Element> + 'a {
    child_elements(element).filter(move |child| child.name == name)
}

/// Direct child elements, skipping text, comments and processing instructions
pub(crate) fn child_elements(element: &Element) -> impl Iterator<Item = &Element> {
    element.children.iter().filter_map(|node| node.as_element())
}
