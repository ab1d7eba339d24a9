use serde::Serialize;

#[derive(Serialize, Debug)]
#[serde(untagged)]
pub enum Frontmatter<'a> {
    Title(&'a str),
    Slug(&'a str),
    NextSlug(Option<&'a str>),
    Order(usize),
    Duration(Option<&'a str>),
    Headings(&'a [Heading]),
    Terms(&'a [String]),
}

#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct Heading {
    pub level: usize,
    pub slug: String,
    pub title: String,
}
