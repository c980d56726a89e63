//! Block-local names of a lambda.
//!
//! `->(a, b; c, d) {}` declares `c` and `d` as block locals. The grammar
//! events do not report them, so the parameter text is lexed again in
//! isolation and walked with a three-state machine. Anything outside the
//! expected shape (defaults, splats, nested parens) yields no locals rather
//! than an error: the names are an enrichment, not part of the tree's
//! correctness.

use stree_ir::TokenKind;

use crate::{lex, LexEvent};

/// A block-local name with its byte range relative to the parameter text.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct LambdaLocal {
    pub name: String,
    pub start: u32,
    pub end: u32,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
enum Step {
    BeforeParams,
    Params,
    Locals,
}

const PREFIX: &str = "->(";

/// Recover the block locals from the text between a lambda's parentheses.
pub fn lambda_locals(params_source: &str) -> Vec<LambdaLocal> {
    let wrapped = format!("{PREFIX}{params_source}){{}}");
    let Ok(events) = lex(&wrapped) else {
        return Vec::new();
    };
    let shift = u32::try_from(PREFIX.len()).unwrap_or(0);

    let mut step = Step::BeforeParams;
    let mut locals = Vec::new();
    for event in events {
        let LexEvent::Token(token) = event else {
            continue;
        };
        step = match (step, token.kind) {
            (Step::BeforeParams, TokenKind::TLambda) => Step::BeforeParams,
            (Step::BeforeParams, TokenKind::LParen) => Step::Params,
            (Step::Params, TokenKind::Ident | TokenKind::Comma | TokenKind::Newline) => {
                Step::Params
            }
            (Step::Params, TokenKind::Semicolon) => Step::Locals,
            (Step::Locals, TokenKind::Ident) => {
                locals.push(LambdaLocal {
                    name: token.text,
                    start: token.span.start_offset - shift,
                    end: token.span.end_offset - shift,
                });
                Step::Locals
            }
            (Step::Locals, TokenKind::Comma | TokenKind::Newline) => Step::Locals,
            (Step::Params | Step::Locals, TokenKind::RParen) => return finish(step, locals),
            _ => {
                tracing::trace!(token = ?token, "lambda locals: unexpected token");
                return Vec::new();
            }
        };
    }
    Vec::new()
}

fn finish(step: Step, locals: Vec<LambdaLocal>) -> Vec<LambdaLocal> {
    if step == Step::Locals {
        locals
    } else {
        Vec::new()
    }
}

#[cfg(test)]
mod tests;
