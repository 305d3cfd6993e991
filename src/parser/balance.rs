//! Table tag balance check used by strict parsing.
//!
//! Tags are counted on the HTML token stream rather than the raw text, so
//! `<table>` inside comments, attribute values, or the raw text of `<script>`,
//! `<style>`, and `<textarea>` is not mistaken for markup.

use html5ever::tendril::StrTendril;
use html5ever::tokenizer::states::RawKind;
use html5ever::tokenizer::{
    BufferQueue, TagKind, Token, TokenSink, TokenSinkResult, Tokenizer, TokenizerOpts,
};

use crate::error::{Error, Result};

/// Counts `<table>` start and end tags as the tokenizer reports them.
#[derive(Debug, Default)]
struct TableTagCounter {
    opened: usize,
    closed: usize,
    /// Line of the first `</table>` with no open table
    stray_close: Option<u64>,
}

impl TokenSink for TableTagCounter {
    type Handle = ();

    fn process_token(&mut self, token: Token, line_number: u64) -> TokenSinkResult<()> {
        let Token::TagToken(tag) = token else {
            return TokenSinkResult::Continue;
        };

        match (tag.kind, &*tag.name) {
            (TagKind::StartTag, "table") => self.opened += 1,
            (TagKind::EndTag, "table") => {
                self.closed += 1;
                if self.closed > self.opened && self.stray_close.is_none() {
                    self.stray_close = Some(line_number);
                }
            }
            // The tree builder switches the tokenizer into these text states;
            // standalone tokenizing has to do the same.
            (TagKind::StartTag, "script") => {
                return TokenSinkResult::RawData(RawKind::ScriptData);
            }
            (TagKind::StartTag, "style" | "xmp" | "iframe" | "noembed" | "noframes" | "noscript") => {
                return TokenSinkResult::RawData(RawKind::Rawtext);
            }
            (TagKind::StartTag, "textarea" | "title") => {
                return TokenSinkResult::RawData(RawKind::Rcdata);
            }
            (TagKind::StartTag, "plaintext") => return TokenSinkResult::Plaintext,
            _ => {}
        }
        TokenSinkResult::Continue
    }
}

/// Verify that `<table>` start and end tags pair up.
///
/// A `</table>` with nothing open is a parse error; otherwise differing counts
/// are reported as unbalanced tables.
pub(crate) fn check_balance(source: &str) -> Result<()> {
    let mut tokenizer = Tokenizer::new(TableTagCounter::default(), TokenizerOpts::default());
    let mut queue = BufferQueue::default();
    queue.push_back(StrTendril::from_slice(source));
    let _ = tokenizer.feed(&mut queue);
    tokenizer.end();

    let counter = tokenizer.sink;
    log::debug!(
        "Table tags: {} opened, {} closed",
        counter.opened,
        counter.closed
    );

    if let Some(line) = counter.stray_close {
        return Err(Error::Parse(format!(
            "</table> on line {} closes no open table",
            line
        )));
    }
    if counter.opened != counter.closed {
        return Err(Error::UnbalancedTables {
            opened: counter.opened,
            closed: counter.closed,
        });
    }
    Ok(())
}
