#![allow(clippy::panic_in_result_fn)]
#![allow(clippy::unwrap_used)]

use xmldom::test_utils::*;

#[test]
fn book_serializes_to_fixed_form() -> Result<()> {
    let book = book_document()?;
    assert_eq!(format_xml(&book), BOOK_XML);
    assert_eq!(book.to_string(), BOOK_XML);
    Ok(())
}

#[test]
fn book_parses_back() -> Result<()> {
    let parsed = parse_xml(BOOK_XML)?;
    assert_eq!(parsed.name(), "book");
    assert_eq!(parsed.attributes_count(), 1);
    assert_eq!(parsed.attribute_name(0)?, "id");
    assert_eq!(parsed.attribute_value("id")?, "1");
    assert_eq!(parsed.children_count(), 1);
    assert_eq!(parsed.child(0)?.name(), "title");
    assert_eq!(parsed.child(0)?.text(), Some("Dune"));
    assert_eq!(parsed, book_document()?);
    Ok(())
}

#[test]
fn output_starts_with_prolog() -> Result<()> {
    let out = format_xml(&Node::new("r")?);
    assert_eq!(out.lines().next(), Some(PROLOG));
    Ok(())
}

#[test]
fn attributes_written_in_insertion_order() -> Result<()> {
    let mut node = Node::new("n")?;
    node.add_attribute("z", "1")?;
    node.add_attribute("a", "2")?;
    node.add_attribute("m", "3")?;
    assert!(format_xml(&node).ends_with("<n z=\"1\" a=\"2\" m=\"3\" />"));
    Ok(())
}

#[test]
fn text_emitted_before_children() -> Result<()> {
    let mut root = Node::new("root")?;
    root.add_element("first")?;
    root.set_text("lead <text>");
    let out = format_xml(&root);
    let lines: Vec<&str> = out.lines().collect();
    assert_eq!(
        lines,
        [
            PROLOG,
            "<root>",
            "\tlead &lt;text&gt;",
            "\t<first />",
            "</root>"
        ]
    );
    Ok(())
}

#[test]
fn nested_tree_round_trips() -> Result<()> {
    let mut root = Node::new("catalog")?;
    root.set_text("Books & more");
    let shelf = root.add_element("shelf")?;
    shelf.add_attribute("label", "\"sci-fi\" <A>")?;
    shelf.add_element("book")?.set_text("It's here");
    shelf.add_element("empty")?;
    root.add_element("footer")?.add_attribute("year", "2024")?;

    let text = format_xml(&root);
    let parsed = parse_xml(&text)?;
    assert_eq!(parsed, root);
    Ok(())
}

#[test]
fn deep_tree_round_trips() -> Result<()> {
    let root = nested_document(40)?;
    let parsed = parse_xml(&format_xml(&root))?;
    assert_eq!(parsed, root);
    assert_eq!(parsed.element_count(), 41);
    Ok(())
}

#[test]
fn space_indent_parses_back() -> Result<()> {
    let root = nested_document(3)?;
    let text = format_xml_with(&root, FormatConfig::with_spaces(4));
    assert!(text.contains("\n    <level n=\"1\">"));
    assert_eq!(parse_xml(&text)?, root);
    Ok(())
}
