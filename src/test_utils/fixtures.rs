use crate::{error::Result, node::Node};

/// Serialized form of [`book_document`]
pub const BOOK_XML: &str = "<?xml version=\"1.0\"?>\n<book id=\"1\">\n\t<title>Dune</title>\n</book>";

pub const INVALID_XML_SAMPLES: [(&str, &str); 5] = [
    ("<xml>\n<a />", "Wrong prolog"),
    ("<?xml version=\"1.0\"?>\n<a>\n<b>\n</c>\n</a>", "Mismatched closing tag"),
    ("<?xml version=\"1.0\"?>\n<1a />", "Invalid element name"),
    ("<?xml version=\"1.0\"?>\n<a>\n<b>", "Unclosed element"),
    ("<?xml version=\"1.0\"?>\n<a b=\"1 />", "Unterminated attribute value"),
];

/// Root `book` with `id="1"` and one child `title` holding `Dune`
pub fn book_document() -> Result<Node> {
    let mut book = Node::new("book")?;
    book.add_attribute("id", "1")?;
    book.add_element("title")?.set_text("Dune");
    Ok(book)
}
