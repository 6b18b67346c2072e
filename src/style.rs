//! Style resolution: class-keyed stylesheet lookups and literal numeric
//! attributes, both producing physical lengths.
//!
//! The two sources degrade differently. Attribute-derived values and
//! stylesheet lookups that find nothing fall back to the caller's default;
//! a stylesheet declaration that *matches* but carries a non-numeric value
//! is a hard error, as is a present-but-malformed numeric attribute.

use docflow_model::Unit;

use crate::css::Stylesheet;
use crate::dom::{NodeId, NodeTree};
use crate::error::ConvertError;

/// Resolve a declared length for `node`'s style class.
///
/// Reads the node's `class` attribute, finds the first rule whose selector
/// group carries that class, and parses the first non-empty term of the
/// `property` declaration as a length in the stylesheet's implied unit,
/// centimeters. Absent class, rule, declaration, or term all yield
/// `default`.
pub fn resolve_length(
    tree: &NodeTree,
    node: NodeId,
    sheet: &Stylesheet,
    property: &str,
    default: Unit,
) -> Result<Unit, ConvertError> {
    let Some(class) = tree.attr(node, "class") else {
        return Ok(default);
    };
    let Some(rule) = sheet.rule_for_class(class) else {
        return Ok(default);
    };
    let Some(declaration) = rule.declaration(property) else {
        return Ok(default);
    };
    let Some(term) = declaration.expression.first_term() else {
        return Ok(default);
    };
    let value: f64 = term.value.parse().map_err(|_| {
        ConvertError::new(
            "CSS_NUMERIC",
            format!(
                "declaration `{property}` for class `{class}` has non-numeric value `{}`",
                term.value
            ),
        )
        .with_property(property)
    })?;
    Ok(Unit::from_centimeter(value))
}

/// Parse a literal numeric attribute value as centimeters.
pub fn parse_length_attr(name: &str, value: &str) -> Result<Unit, ConvertError> {
    let parsed: f64 = value.trim().parse().map_err(|_| {
        ConvertError::new(
            "ATTR_NUMERIC",
            format!("attribute `{name}` has non-numeric value `{value}`"),
        )
        .with_attribute(name)
    })?;
    Ok(Unit::from_centimeter(parsed))
}

/// Parse a four-sided attribute value: exactly four space-separated
/// numbers in top/right/bottom/left order, as centimeters.
pub fn parse_quad_attr(name: &str, value: &str) -> Result<[Unit; 4], ConvertError> {
    let mut parts = value.split_whitespace();
    let mut sides = [Unit::ZERO; 4];
    for side in sides.iter_mut() {
        let Some(token) = parts.next() else {
            return Err(ConvertError::new(
                "ATTR_NUMERIC",
                format!("attribute `{name}` needs four values, got `{value}`"),
            )
            .with_attribute(name));
        };
        *side = parse_length_attr(name, token)?;
    }
    if parts.next().is_some() {
        return Err(ConvertError::new(
            "ATTR_NUMERIC",
            format!("attribute `{name}` needs four values, got `{value}`"),
        )
        .with_attribute(name));
    }
    Ok(sides)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::css::parse_stylesheet;

    const DEFAULT: Unit = Unit::ZERO;

    fn tree_with(markup: &str) -> (NodeTree, NodeId) {
        let tree = NodeTree::parse(markup).unwrap();
        let root = tree.roots()[0];
        (tree, root)
    }

    #[test]
    fn matched_class_and_declaration_resolves() {
        let (tree, node) = tree_with(r#"<div class="x"></div>"#);
        let sheet = parse_stylesheet(".x { margin-top: 0.5; }").unwrap();
        let resolved = resolve_length(&tree, node, &sheet, "margin-top", DEFAULT).unwrap();
        assert_eq!(resolved, Unit::from_centimeter(0.5));
    }

    #[test]
    fn absent_class_falls_back_to_default() {
        let (tree, node) = tree_with("<div></div>");
        let sheet = parse_stylesheet(".x { margin-top: 0.5; }").unwrap();
        let resolved =
            resolve_length(&tree, node, &sheet, "margin-top", Unit::from_centimeter(2.0)).unwrap();
        assert_eq!(resolved, Unit::from_centimeter(2.0));
    }

    #[test]
    fn unmatched_class_falls_back_to_default() {
        let (tree, node) = tree_with(r#"<div class="y"></div>"#);
        let sheet = parse_stylesheet(".x { margin-top: 0.5; }").unwrap();
        let resolved =
            resolve_length(&tree, node, &sheet, "margin-top", Unit::from_centimeter(2.0)).unwrap();
        assert_eq!(resolved, Unit::from_centimeter(2.0));
    }

    #[test]
    fn missing_declaration_falls_back_to_default() {
        let (tree, node) = tree_with(r#"<div class="x"></div>"#);
        let sheet = parse_stylesheet(".x { color: red; }").unwrap();
        let resolved =
            resolve_length(&tree, node, &sheet, "margin-top", Unit::from_centimeter(2.0)).unwrap();
        assert_eq!(resolved, Unit::from_centimeter(2.0));
    }

    #[test]
    fn matched_but_malformed_declaration_is_a_hard_error() {
        let (tree, node) = tree_with(r#"<div class="x"></div>"#);
        let sheet = parse_stylesheet(".x { margin-top: wide; }").unwrap();
        let err = resolve_length(&tree, node, &sheet, "margin-top", DEFAULT).unwrap_err();
        assert_eq!(err.code, "CSS_NUMERIC");
        assert_eq!(err.property.as_deref(), Some("margin-top"));
    }

    #[test]
    fn unit_suffixed_declaration_still_resolves() {
        let (tree, node) = tree_with(r#"<div class="x"></div>"#);
        let sheet = parse_stylesheet(".x { margin-top: 1.25cm; }").unwrap();
        let resolved = resolve_length(&tree, node, &sheet, "margin-top", DEFAULT).unwrap();
        assert_eq!(resolved, Unit::from_centimeter(1.25));
    }

    #[test]
    fn quad_attribute_orders_top_right_bottom_left() {
        let sides = parse_quad_attr("data-margin", "1 2 3 4").unwrap();
        assert_eq!(sides[0], Unit::from_centimeter(1.0));
        assert_eq!(sides[1], Unit::from_centimeter(2.0));
        assert_eq!(sides[2], Unit::from_centimeter(3.0));
        assert_eq!(sides[3], Unit::from_centimeter(4.0));
    }

    #[test]
    fn quad_attribute_rejects_wrong_arity_and_bad_numbers() {
        assert_eq!(
            parse_quad_attr("data-padding", "1 2 3").unwrap_err().code,
            "ATTR_NUMERIC"
        );
        assert_eq!(
            parse_quad_attr("data-padding", "1 2 3 4 5").unwrap_err().code,
            "ATTR_NUMERIC"
        );
        assert_eq!(
            parse_quad_attr("data-padding", "1 2 x 4").unwrap_err().code,
            "ATTR_NUMERIC"
        );
    }

    #[test]
    fn length_attribute_parses_or_errors() {
        assert_eq!(
            parse_length_attr("data-width", "2.5").unwrap(),
            Unit::from_centimeter(2.5)
        );
        let err = parse_length_attr("data-width", "wide").unwrap_err();
        assert_eq!(err.code, "ATTR_NUMERIC");
        assert_eq!(err.attribute.as_deref(), Some("data-width"));
    }
}
