use std::rc::Rc;

use pest::iterators::Pair;
use pest::Parser;
use pest_derive::Parser;

use crate::semantics::Error;

#[derive(Parser)]
#[grammar = "parser/grammar.pest"] // relative to src
pub struct PageParser;

/// An attribute as written: name and optional value.
pub type RawAttribute = (Rc<str>, Option<Rc<str>>);

/// A piece of page markup, before classification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    Text(Rc<str>),
    /// `<%@ Name key="value" %>`
    Directive {
        name: Rc<str>,
        attributes: Vec<RawAttribute>,
    },
    /// `<% source %>`, or `<%= source %>` when `expression` is set.
    Code { source: Rc<str>, expression: bool },
    Open {
        name: Rc<str>,
        attributes: Vec<RawAttribute>,
        self_closing: bool,
    },
    Close(Rc<str>),
}

/// Splits page markup into tokens, in document order. Server comments are dropped.
pub fn tokenize(source: &str) -> Result<Vec<Token>, Error> {
    let mut pairs = PageParser::parse(Rule::main, source)?;
    let Some(main) = pairs.next() else {
        return Ok(vec![]);
    };

    let mut tokens = vec![];
    for pair in main.into_inner() {
        match pair.as_rule() {
            Rule::text => tokens.push(Token::Text(Rc::from(pair.as_str()))),
            Rule::server_comment => continue,
            Rule::directive => {
                let (name, attributes, _) = tag_parts(pair);
                tokens.push(Token::Directive { name, attributes });
            }
            Rule::inline_code | Rule::inline_var => {
                let expression = pair.as_rule() == Rule::inline_var;
                let source = pair.into_inner().next().map_or("", |code| code.as_str());
                tokens.push(Token::Code {
                    source: Rc::from(source),
                    expression,
                });
            }
            Rule::close_tag => {
                let (name, _, _) = tag_parts(pair);
                tokens.push(Token::Close(name));
            }
            Rule::open_tag => {
                let (name, attributes, self_closing) = tag_parts(pair);
                tokens.push(Token::Open {
                    name,
                    attributes,
                    self_closing,
                });
            }
            Rule::EOI => break,
            other => unreachable!("rule {:?} is not a page node", other),
        }
    }
    tracing::trace!("tokenized {} bytes into {} tokens", source.len(), tokens.len());
    return Ok(tokens);
}

/// Name, attributes and self-closing marker of a tag-like pair.
fn tag_parts(pair: Pair<'_, Rule>) -> (Rc<str>, Vec<RawAttribute>, bool) {
    let mut name = Rc::from("");
    let mut attributes = vec![];
    let mut self_closing = false;
    for inner in pair.into_inner() {
        match inner.as_rule() {
            Rule::tag_name => name = Rc::from(inner.as_str()),
            Rule::attribute => attributes.push(attribute(inner)),
            Rule::self_closing => self_closing = true,
            _ => {}
        }
    }
    (name, attributes, self_closing)
}

fn attribute(pair: Pair<'_, Rule>) -> RawAttribute {
    let mut inner = pair.into_inner();
    let name = inner.next().map_or("", |name| name.as_str());
    let value = inner.next().map(|value| Rc::from(value.as_str()));
    (Rc::from(name), value)
}
