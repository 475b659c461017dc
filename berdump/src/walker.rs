//! Tree walker
//!
//! Visits every node of a BER stream in document order and writes one
//! report line per node. Open constructed nodes are kept on an ancestry
//! stack whose length is the indentation depth. After each advance every
//! frame that no longer contains the next node is popped, so leaving
//! several nesting levels through a single last leaf closes all of them.

use berdump_ber::{
    Asn1Error, Asn1Result, ErrorKind, Node, first_child, is_descendant_of, next, root,
    value_bytes,
};
use thiserror::Error;

use crate::render::render;
use crate::report::Report;
use crate::tag::classify;

/// A decode that stopped early
///
/// `partial` holds every line emitted before the failure.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{error} (after {nodes} nodes)", nodes = .partial.nodes())]
pub struct DecodeFailure {
    #[source]
    pub error: Asn1Error,
    pub partial: Report,
}

impl DecodeFailure {
    pub fn kind(&self) -> ErrorKind {
        self.error.kind()
    }
}

/// Walks one buffer and builds its report
pub struct TreeWalker<'a> {
    buffer: &'a [u8],
    ancestors: Vec<Node>,
    report: Report,
}

impl<'a> TreeWalker<'a> {
    pub fn new(buffer: &'a [u8], indent: usize) -> Self {
        Self {
            buffer,
            ancestors: Vec::new(),
            report: Report::new(indent),
        }
    }

    /// Current nesting depth
    fn depth(&self) -> usize {
        self.ancestors.len()
    }

    /// Walk the whole buffer from its root node
    pub fn run(mut self) -> Result<Report, DecodeFailure> {
        match self.walk() {
            Ok(()) => Ok(self.report),
            Err(error) => {
                log::warn!(
                    "decode stopped after {} nodes: {}",
                    self.report.nodes(),
                    error
                );
                Err(DecodeFailure {
                    error,
                    partial: self.report,
                })
            }
        }
    }

    fn walk(&mut self) -> Asn1Result<()> {
        let mut node = exhausted_as_none(root(self.buffer))?;
        while let Some(current) = node {
            node = self.visit(&current)?;
        }
        Ok(())
    }

    /// Emit the line for `node` and return the node to visit after it
    fn visit(&mut self, node: &Node) -> Asn1Result<Option<Node>> {
        let tag = node.tag(self.buffer)?;
        let descriptor = classify(&tag)?;
        log::debug!(
            "node {}..{} {} ({} bytes) depth {}",
            node.start(),
            node.end(),
            descriptor,
            node.len(),
            self.depth()
        );

        if tag.is_constructed() {
            self.report.group(self.depth(), &descriptor);
            if let Some(child) = exhausted_as_none(first_child(self.buffer, node))? {
                self.ancestors.push(*node);
                return Ok(Some(child));
            }
        } else {
            let rendering = render(&descriptor, value_bytes(self.buffer, node))?;
            self.report.element(self.depth(), &descriptor, &rendering);
        }

        self.advance(node)
    }

    fn advance(&mut self, node: &Node) -> Asn1Result<Option<Node>> {
        let Some(following) = exhausted_as_none(next(self.buffer, node))? else {
            return Ok(None);
        };

        while let Some(top) = self.ancestors.last() {
            if is_descendant_of(top, &following) {
                break;
            }
            if following.start() < top.end() {
                return Err(Asn1Error::InvalidLength(format!(
                    "node at offset {} ends at {}, past its parent ending at {}",
                    following.start(),
                    following.end(),
                    top.end()
                )));
            }
            self.ancestors.pop();
        }

        Ok(Some(following))
    }
}

fn exhausted_as_none(result: Asn1Result<Node>) -> Asn1Result<Option<Node>> {
    match result {
        Ok(node) => Ok(Some(node)),
        Err(e) if e.is_exhausted() => Ok(None),
        Err(e) => Err(e),
    }
}

/// Walk `buffer` with the given indentation width
pub fn walk(buffer: &[u8], indent: usize) -> Result<Report, DecodeFailure> {
    TreeWalker::new(buffer, indent).run()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::DEFAULT_INDENT;

    fn dump(der: &[u8]) -> String {
        walk(der, DEFAULT_INDENT).unwrap().into_string()
    }

    #[test]
    fn test_single_element() {
        assert_eq!(dump(&[0x02, 0x01, 0x05]), "element INTEGER int 5\n");
    }

    #[test]
    fn test_empty_input() {
        let report = walk(&[], DEFAULT_INDENT).unwrap();
        assert!(report.is_empty());
    }

    #[test]
    fn test_flat_sequence() {
        // SEQUENCE { INTEGER 5, BOOLEAN FALSE, NULL }
        let der = [0x30, 0x08, 0x02, 0x01, 0x05, 0x01, 0x01, 0x00, 0x05, 0x00];
        assert_eq!(
            dump(&der),
            "group SEQUENCE\n\
             \x20   element INTEGER int 5\n\
             \x20   element BOOLEAN bool false\n\
             \x20   element NULL null\n"
        );
    }

    #[test]
    fn test_closes_several_levels_at_once() {
        // SEQUENCE { SEQUENCE { SEQUENCE { INTEGER 1 } }, INTEGER 2 }
        let der = [
            0x30, 0x0A, 0x30, 0x05, 0x30, 0x03, 0x02, 0x01, 0x01, 0x02, 0x01, 0x02,
        ];
        assert_eq!(
            dump(&der),
            "group SEQUENCE\n\
             \x20   group SEQUENCE\n\
             \x20       group SEQUENCE\n\
             \x20           element INTEGER int 1\n\
             \x20   element INTEGER int 2\n"
        );
    }

    #[test]
    fn test_empty_group_is_not_pushed() {
        // SEQUENCE { SET {}, INTEGER 7 }
        let der = [0x30, 0x05, 0x31, 0x00, 0x02, 0x01, 0x07];
        assert_eq!(
            dump(&der),
            "group SEQUENCE\n\
             \x20   group SET\n\
             \x20   element INTEGER int 7\n"
        );
    }

    #[test]
    fn test_top_level_siblings() {
        let der = [0x30, 0x03, 0x02, 0x01, 0x01, 0x02, 0x01, 0x02];
        assert_eq!(
            dump(&der),
            "group SEQUENCE\n    element INTEGER int 1\nelement INTEGER int 2\n"
        );
    }

    #[test]
    fn test_truncated_keeps_partial_report() {
        let der = [0x30, 0x06, 0x02, 0x01, 0x05, 0x02, 0x05, 0x01];
        let failure = walk(&der, DEFAULT_INDENT).unwrap_err();
        assert_eq!(failure.kind(), ErrorKind::MalformedEncoding);
        assert_eq!(
            failure.partial.as_str(),
            "group SEQUENCE\n    element INTEGER int 5\n"
        );
        assert_eq!(failure.partial.nodes(), 2);
    }

    #[test]
    fn test_sibling_overrunning_parent_fails() {
        // SEQUENCE { INTEGER 5, INTEGER reaching two bytes past the SEQUENCE }
        let der = [0x30, 0x04, 0x02, 0x01, 0x05, 0x02, 0x02, 0x06, 0x07];
        let failure = walk(&der, DEFAULT_INDENT).unwrap_err();
        assert_eq!(failure.kind(), ErrorKind::MalformedEncoding);
        assert!(matches!(failure.error, Asn1Error::InvalidLength(_)));
        assert_eq!(
            failure.partial.as_str(),
            "group SEQUENCE\n    element INTEGER int 5\n"
        );
    }

    #[test]
    fn test_sibling_overrunning_outer_parent_fails() {
        // SEQUENCE { SEQUENCE { INTEGER 1 }, INTEGER overrunning the outer SEQUENCE }
        let der = [
            0x30, 0x06, 0x30, 0x03, 0x02, 0x01, 0x01, 0x02, 0x02, 0x07, 0x08,
        ];
        let failure = walk(&der, DEFAULT_INDENT).unwrap_err();
        assert!(matches!(failure.error, Asn1Error::InvalidLength(_)));
        assert_eq!(failure.partial.nodes(), 3);
    }

    #[test]
    fn test_unknown_universal_tag_fails() {
        // SEQUENCE { [UNIVERSAL 40] }
        let der = [0x30, 0x04, 0x1F, 0x28, 0x01, 0x00];
        let failure = walk(&der, DEFAULT_INDENT).unwrap_err();
        assert_eq!(failure.error, Asn1Error::UnknownUniversalTag(40));
        assert_eq!(failure.partial.as_str(), "group SEQUENCE\n");
    }

    #[test]
    fn test_failure_display() {
        let failure = walk(&[0x02, 0x05, 0x01], DEFAULT_INDENT).unwrap_err();
        assert_eq!(
            failure.to_string(),
            "Truncated encoding at offset 0: need 5 bytes, have 1 (after 0 nodes)"
        );
    }
}
