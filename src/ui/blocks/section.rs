use crate::ui::primitives::icon::Icon;
use crate::ui::primitives::text::ColoredText;
use crate::ui::theme::rules;

/// A titled banner between two heavy rules, opening each phase of a run
#[derive(Debug, Clone)]
pub struct SectionBanner {
    title: String,
}

impl SectionBanner {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
        }
    }

    pub fn render(&self, supports_color: bool, supports_unicode: bool) -> String {
        let glyph = if supports_unicode {
            rules::HEAVY
        } else {
            rules::HEAVY_ASCII
        };
        let rule = ColoredText::accent(glyph.repeat(rules::WIDTH))
            .bold()
            .render(supports_color);
        let title = ColoredText::info(self.title.as_str())
            .bold()
            .render(supports_color);

        format!(
            "\n{rule}\n{} {}\n{rule}\n",
            Icon::Section.colored(supports_color, supports_unicode),
            title
        )
    }
}
