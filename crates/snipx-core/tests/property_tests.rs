use proptest::prelude::*;

use snipx_core::highlight::{supported_lexers, Highlighter};
use snipx_core::ident::{is_alphabet_code, RandomShortCodes, ShortCodeSource};

fn lexer_name() -> impl Strategy<Value = &'static str> {
    prop::sample::select(supported_lexers().iter().map(|spec| spec.name).collect::<Vec<_>>())
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn render_is_deterministic(raw in "[ -~\n]{0,200}", lexer in lexer_name()) {
        let highlighter = Highlighter::new();
        prop_assert_eq!(highlighter.render(&raw, lexer), highlighter.render(&raw, lexer));
    }

    #[test]
    fn render_keeps_one_balanced_line_per_source_line(raw in "[ -~\n]{0,200}", lexer in lexer_name()) {
        let rendered = Highlighter::new().render(&raw, lexer);
        prop_assert_eq!(rendered.lines().count(), raw.lines().count());
        for line in rendered.lines() {
            prop_assert_eq!(line.matches("<span").count(), line.matches("</span>").count());
        }
    }

    #[test]
    fn render_never_leaks_markup(raw in "[<>&a-z ]{1,80}") {
        let rendered = Highlighter::new().render(&raw, "text");
        prop_assert!(!rendered.contains("<a"));
        prop_assert!(!rendered.contains("<b"));
    }

    #[test]
    fn short_codes_use_the_alphabet(length in 1usize..12) {
        let code = RandomShortCodes.generate(length);
        prop_assert_eq!(code.chars().count(), length);
        prop_assert!(is_alphabet_code(&code));
    }
}
