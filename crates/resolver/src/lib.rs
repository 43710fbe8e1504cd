//! Caller-context resolution for failed checks
//!
//! Given where a check failed and the value it expected, re-parse the test
//! source, find the exact validation call on that line and describe the
//! asserted expression as a dotted name (`order.total`).
//!
//! Resolution never fails loudly. An unreadable file, an unparsable file, a
//! line without a matching call or a set of candidates that all disagree
//! with the expected value each produce "no context".

#![cfg_attr(not(test), deny(clippy::unwrap_used))]
#![cfg_attr(not(test), deny(clippy::expect_used))]

pub mod candidates;
pub mod chain;
pub mod disambiguate;
pub mod literal;
pub mod locator;
pub mod source;

use candidates::{match_anchored_candidates, match_candidates};
use locator::ParsedSource;
use std::path::Path;
use tree_sitter::Node;
use verdict_core::call_site::CallSite;
use verdict_core::config::ResolverConfig;
use verdict_core::context::ContextResolver;
use verdict_core::error::Result;
use verdict_core::expected::Expected;

/// Resolver that re-parses the call site's source file
#[derive(Debug, Clone, Default)]
pub struct CallerContextResolver {
    config: ResolverConfig,
}

impl CallerContextResolver {
    pub fn new(config: ResolverConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ResolverConfig {
        &self.config
    }

    /// Resolve from loose call-site coordinates
    pub fn resolve_parts(
        &self,
        expected: &Expected,
        test_method_name: &str,
        validation_method_name: &str,
        line_number: usize,
        source_file_path: &Path,
    ) -> Option<String> {
        let call_site = CallSite::new(
            source_file_path,
            line_number,
            test_method_name,
            validation_method_name,
        );
        self.resolve(expected, &call_site)
    }

    fn try_resolve(&self, expected: &Expected, call_site: &CallSite) -> Result<Option<String>> {
        let path = source::locate(call_site.path(), &self.config.source_roots)?;
        let text = source::read(&path)?;
        let parsed = ParsedSource::parse(text, &path.display().to_string())?;
        let method = call_site.validation_method_name.as_str();

        let nodes = parsed.nodes_on_line(call_site.line_number);
        let mut candidates = match_candidates(&nodes, parsed.text(), method);
        if candidates.is_empty() && call_site.line_number > 0 {
            candidates = match_anchored_candidates(
                parsed.root(),
                parsed.text(),
                method,
                call_site.line_number - 1,
            );
        }
        if candidates.is_empty() {
            tracing::debug!(
                file = %path.display(),
                line = call_site.line_number,
                method = method,
                "No matching validation call on line"
            );
            return Ok(None);
        }

        let Some(selected) = disambiguate::select(&candidates, expected, parsed.text()) else {
            tracing::debug!(
                file = %path.display(),
                line = call_site.line_number,
                method = method,
                candidates = candidates.len(),
                "Every candidate disagreed with the expected value"
            );
            return Ok(None);
        };

        Ok(Some(chain::build_chain(
            &selected,
            parsed.text(),
            method,
            &self.config.entry_point,
        )))
    }
}

impl ContextResolver for CallerContextResolver {
    fn resolve(&self, expected: &Expected, call_site: &CallSite) -> Option<String> {
        if !self.config.enabled {
            return None;
        }
        match self.try_resolve(expected, call_site) {
            Ok(context) => {
                tracing::trace!(
                    call_site = %call_site,
                    context = ?context,
                    "Resolved caller context"
                );
                context
            }
            Err(e) => {
                tracing::debug!(
                    call_site = %call_site,
                    test = call_site.test_method_name.as_str(),
                    error = %e,
                    "Caller context unavailable"
                );
                None
            }
        }
    }
}

/// Extract the text content of a node
pub(crate) fn node_text<'a>(node: Node, source: &'a str) -> &'a str {
    match node.utf8_text(source.as_bytes()) {
        Ok(text) => text,
        Err(e) => {
            tracing::warn!(
                node_kind = node.kind(),
                start_byte = node.start_byte(),
                end_byte = node.end_byte(),
                error = %e,
                "Failed to extract node text as UTF-8, treating as empty"
            );
            ""
        }
    }
}
