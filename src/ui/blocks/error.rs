use crate::ui::primitives::icon::Icon;
use crate::ui::primitives::text::ColoredText;

/// Fatal diagnostic: a red title line, optional detail, optional fix hint
#[derive(Debug, Clone)]
pub struct ErrorBlock {
    title: String,
    detail: Option<String>,
    fix: Option<String>,
}

impl ErrorBlock {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            detail: None,
            fix: None,
        }
    }

    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }

    pub fn with_fix(mut self, fix: impl Into<String>) -> Self {
        self.fix = Some(fix.into());
        self
    }

    pub fn render(&self, supports_color: bool, supports_unicode: bool) -> String {
        let mut out = format!(
            "{} {}\n",
            Icon::Error.colored(supports_color, supports_unicode),
            ColoredText::error(format!("Error: {}", self.title))
                .bold()
                .render(supports_color)
        );

        if let Some(detail) = &self.detail {
            for line in detail.lines() {
                out.push_str(&format!("  {}\n", ColoredText::dim(line).render(supports_color)));
            }
        }

        if let Some(fix) = &self.fix {
            out.push_str(&format!(
                "  {} {}\n",
                ColoredText::info("FIX:").bold().render(supports_color),
                fix
            ));
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_title_detail_and_fix() {
        let rendered = ErrorBlock::new("build failed")
            .with_detail("cargo exited with exit code 101")
            .with_fix("Run the build by hand to see the compiler output.")
            .render(false, false);

        assert_eq!(
            rendered,
            "[FAIL] Error: build failed\n  cargo exited with exit code 101\n  FIX: Run the build by hand to see the compiler output.\n"
        );
    }

    #[test]
    fn title_only() {
        let rendered = ErrorBlock::new("interrupted").render(false, true);
        assert_eq!(rendered, "✗ Error: interrupted\n");
    }
}
