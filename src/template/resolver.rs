//! Placeholder resolution - inlines fragment files into template source

use std::path::{Path, PathBuf};

use crate::config::InlinerConfig;
use crate::error::InlineError;
use crate::parser::{scan, Placeholder, Segment};
use crate::report::{NullReporter, Reporter, TokenFailure};

use super::store::FragmentStore;

/// Outcome of resolving one placeholder
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// Fully resolved fragment text to substitute for the placeholder
    Inlined(String),
    /// No fragment exists; the placeholder stays as written
    Unresolved,
}

/// Per-call state for one top-level resolution
#[derive(Debug, Clone, Default)]
pub struct ResolutionContext {
    /// Fragments currently being inlined, outermost first
    stack: Vec<PathBuf>,
}

impl ResolutionContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of fragments currently being inlined
    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    /// Check if a fragment is currently being inlined (cycle detection)
    pub fn is_resolving(&self, path: &Path) -> bool {
        self.stack.iter().any(|p| p == path)
    }

    fn start_resolving(&mut self, path: PathBuf) {
        self.stack.push(path);
    }

    fn done_resolving(&mut self) {
        self.stack.pop();
    }

    /// The include chain from the first occurrence of `path` back to `path`
    fn cycle_to(&self, path: &Path) -> Vec<PathBuf> {
        let start = self.stack.iter().position(|p| p == path).unwrap_or(0);
        let mut chain = self.stack[start..].to_vec();
        chain.push(path.to_path_buf());
        chain
    }
}

/// Resolves placeholders against a fragment tree
pub struct Inliner<'r> {
    store: FragmentStore,
    config: InlinerConfig,
    reporter: &'r dyn Reporter,
}

impl Inliner<'static> {
    /// Create an inliner that discards all reports
    pub fn new(config: InlinerConfig) -> Self {
        Inliner::with_reporter(config, &NullReporter)
    }
}

impl<'r> Inliner<'r> {
    pub fn with_reporter(config: InlinerConfig, reporter: &'r dyn Reporter) -> Self {
        Self {
            store: FragmentStore::new(config.components_dir.clone()),
            config,
            reporter,
        }
    }

    pub fn config(&self) -> &InlinerConfig {
        &self.config
    }

    pub fn store(&self) -> &FragmentStore {
        &self.store
    }

    /// Resolve every placeholder in `content`, recursively.
    ///
    /// Placeholders without a fragment are kept verbatim. Placeholders whose
    /// fragment fails to load, or which would nest too deep or include
    /// themselves, are reported and kept verbatim.
    pub fn resolve(&self, content: &str) -> String {
        self.resolve_named(content, "<input>")
    }

    /// Like [`Inliner::resolve`], naming the document as `origin` in reports
    pub fn resolve_named(&self, content: &str, origin: &str) -> String {
        let mut ctx = ResolutionContext::new();
        self.resolve_in(content, origin, &mut ctx)
    }

    fn resolve_in(&self, content: &str, origin: &str, ctx: &mut ResolutionContext) -> String {
        let mut out = String::with_capacity(content.len());

        for segment in scan(content) {
            match segment {
                Segment::Text(text) => out.push_str(text),
                Segment::Placeholder {
                    placeholder,
                    raw,
                    span,
                } => match self.resolve_placeholder(&placeholder, ctx) {
                    Ok(Resolution::Inlined(text)) => out.push_str(&text),
                    Ok(Resolution::Unresolved) => out.push_str(raw),
                    Err(error) => {
                        self.reporter.report_error(&TokenFailure {
                            error: &error,
                            token: raw,
                            span,
                            source: content,
                            origin,
                        });
                        out.push_str(raw);
                    }
                },
            }
        }

        out
    }

    /// Resolve a single placeholder within an ongoing resolution
    pub fn resolve_placeholder(
        &self,
        placeholder: &Placeholder,
        ctx: &mut ResolutionContext,
    ) -> Result<Resolution, InlineError> {
        let fragment = match self.store.load(placeholder)? {
            Some(fragment) => fragment,
            None => return Ok(Resolution::Unresolved),
        };

        if ctx.is_resolving(&fragment.path) {
            return Err(InlineError::CircularInclude {
                chain: ctx.cycle_to(&fragment.path),
            });
        }
        if let Some(max) = self.config.max_depth.filter(|max| ctx.depth() >= *max) {
            return Err(InlineError::DepthExceeded {
                path: fragment.path,
                max,
            });
        }

        let origin = fragment.path.display().to_string();
        ctx.start_resolving(fragment.path.clone());
        self.reporter.report_inlined(&fragment.path, ctx.depth());
        let inner = self.resolve_in(&fragment.content, &origin, ctx);
        ctx.done_resolving();

        if placeholder.kind.has_banner() && self.config.svg_banner {
            Ok(Resolution::Inlined(format!(
                "<!-- START {origin} -->{inner}<!-- END {origin} -->"
            )))
        } else {
            Ok(Resolution::Inlined(inner))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::Kind;
    use crate::report::CollectingReporter;
    use std::fs;
    use tempfile::TempDir;

    fn write(root: &Path, rel: &str, content: &str) {
        let path = root.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    fn config(dir: &TempDir) -> InlinerConfig {
        InlinerConfig::new().with_components_dir(dir.path())
    }

    #[test]
    fn test_no_placeholders_is_identity() {
        let dir = TempDir::new().unwrap();
        let inliner = Inliner::new(config(&dir));
        let html = "<html><style>a{color:red}</style>{not:{a}}</html>";
        assert_eq!(inliner.resolve(html), html);
    }

    #[test]
    fn test_app_fragment_inlined() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "app/header/header.html", "<header>X</header>");
        let inliner = Inliner::new(config(&dir));
        assert_eq!(
            inliner.resolve("<body>{app:{header}}</body>"),
            "<body><header>X</header></body>"
        );
    }

    #[test]
    fn test_missing_fragment_left_verbatim_without_report() {
        let dir = TempDir::new().unwrap();
        let reporter = CollectingReporter::new();
        let inliner = Inliner::with_reporter(config(&dir), &reporter);
        assert_eq!(inliner.resolve("{app:{missing}}"), "{app:{missing}}");
        assert!(reporter.errors().is_empty());
    }

    #[test]
    fn test_svg_fragment_gets_banner() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "app/_svg/icon/icon.svg", "<svg/>");
        let inliner = Inliner::new(config(&dir));
        let path = dir.path().join("app/_svg/icon/icon.svg");
        assert_eq!(
            inliner.resolve("{svg:{icon}}"),
            format!(
                "<!-- START {p} --><svg/><!-- END {p} -->",
                p = path.display()
            )
        );
    }

    #[test]
    fn test_svg_banner_can_be_disabled() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "app/_svg/icon/icon.svg", "<svg/>");
        let inliner = Inliner::new(config(&dir).with_svg_banner(false));
        assert_eq!(inliner.resolve("{svg:{icon}}"), "<svg/>");
    }

    #[test]
    fn test_deferred_fragment_has_no_banner() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "app/_deferred/chat/widget.html", "<div>chat</div>");
        let inliner = Inliner::new(config(&dir));
        assert_eq!(inliner.resolve("{deferred:{chat}:{widget}}"), "<div>chat</div>");
    }

    #[test]
    fn test_nested_fragments() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "app/a/a.html", "[{app:{b}}]");
        write(dir.path(), "app/b/b.html", "Y");
        let inliner = Inliner::new(config(&dir));
        assert_eq!(inliner.resolve("{app:{a}}"), "[Y]");
    }

    #[test]
    fn test_cycle_is_reported_and_terminates() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "app/a/a.html", "a({app:{b}})");
        write(dir.path(), "app/b/b.html", "b({app:{a}})");
        let reporter = CollectingReporter::new();
        let inliner = Inliner::with_reporter(config(&dir), &reporter);

        assert_eq!(inliner.resolve("{app:{a}}"), "a(b({app:{a}}))");
        let errors = reporter.errors();
        assert_eq!(errors.len(), 1);
        assert!(errors[0].starts_with("circular fragment inclusion"));
    }

    #[test]
    fn test_self_include() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "app/loop/loop.html", "<{app:{loop}}>");
        let reporter = CollectingReporter::new();
        let inliner = Inliner::with_reporter(config(&dir), &reporter);

        assert_eq!(inliner.resolve("{app:{loop}}"), "<{app:{loop}}>");
        assert_eq!(reporter.errors().len(), 1);
    }

    #[test]
    fn test_same_fragment_twice_is_not_a_cycle() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "app/dot/dot.html", ".");
        write(dir.path(), "app/row/row.html", "{app:{dot}}{app:{dot}}");
        let reporter = CollectingReporter::new();
        let inliner = Inliner::with_reporter(config(&dir), &reporter);

        assert_eq!(inliner.resolve("{app:{row}}{app:{dot}}"), "...");
        assert!(reporter.errors().is_empty());
    }

    #[test]
    fn test_deep_acyclic_chain_resolves_fully_by_default() {
        let dir = TempDir::new().unwrap();
        let levels = 40;
        for n in 0..levels {
            let next = if n + 1 < levels {
                format!(",{{app:{{f{}}}}}", n + 1)
            } else {
                String::new()
            };
            write(dir.path(), &format!("app/f{n}/f{n}.html"), &format!("{n}{next}"));
        }
        let reporter = CollectingReporter::new();
        let inliner = Inliner::with_reporter(config(&dir), &reporter);

        let expected = (0..levels).map(|n| n.to_string()).collect::<Vec<_>>().join(",");
        assert_eq!(inliner.resolve("{app:{f0}}"), expected);
        assert!(reporter.errors().is_empty());
    }

    #[test]
    fn test_multibyte_text_preserved() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "app/x/x.html", "ü{app:{y}}ü");
        write(dir.path(), "app/y/y.html", "🦀");
        let inliner = Inliner::new(config(&dir));

        assert_eq!(inliner.resolve("日本{app:{x}}語"), "日本ü🦀ü語");
    }

    #[test]
    fn test_depth_limit() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "app/one/one.html", "1{app:{two}}");
        write(dir.path(), "app/two/two.html", "2{app:{three}}");
        write(dir.path(), "app/three/three.html", "3");
        let reporter = CollectingReporter::new();
        let inliner = Inliner::with_reporter(config(&dir).with_max_depth(2), &reporter);

        assert_eq!(inliner.resolve("{app:{one}}"), "12{app:{three}}");
        assert_eq!(reporter.errors().len(), 1);
        assert!(reporter.errors()[0].contains("maximum nesting depth of 2"));
    }

    #[test]
    fn test_read_error_keeps_token_and_siblings_resolve() {
        let dir = TempDir::new().unwrap();
        fs::create_dir_all(dir.path().join("app/broken/broken.html")).unwrap();
        write(dir.path(), "app/ok/ok.html", "fine");
        let reporter = CollectingReporter::new();
        let inliner = Inliner::with_reporter(config(&dir), &reporter);

        assert_eq!(
            inliner.resolve("{app:{broken}} {app:{ok}}"),
            "{app:{broken}} fine"
        );
        assert_eq!(reporter.errors().len(), 1);
    }

    #[test]
    fn test_inlined_fragments_are_reported() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "app/a/a.html", "{app:{b}}");
        write(dir.path(), "app/b/b.html", "");
        let reporter = CollectingReporter::new();
        let inliner = Inliner::with_reporter(config(&dir), &reporter);
        inliner.resolve("{app:{a}}");

        let inlined = reporter.inlined();
        assert_eq!(inlined.len(), 2);
        assert!(inlined[0].ends_with("a.html"));
        assert!(inlined[1].ends_with("b.html"));
    }

    #[test]
    fn test_resolve_placeholder_explicit_result() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "app/x/x.html", "X");
        let inliner = Inliner::new(config(&dir));
        let mut ctx = ResolutionContext::new();

        assert_eq!(
            inliner
                .resolve_placeholder(&Placeholder::new(Kind::App, "x"), &mut ctx)
                .unwrap(),
            Resolution::Inlined("X".to_string())
        );
        assert_eq!(
            inliner
                .resolve_placeholder(&Placeholder::new(Kind::App, "y"), &mut ctx)
                .unwrap(),
            Resolution::Unresolved
        );
        assert_eq!(ctx.depth(), 0);
    }
}
