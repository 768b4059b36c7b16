use regex::Regex;
use std::sync::LazyLock;

static TRANSLATE_PX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"translate(?:3d|X)?\(\s*(-?\d+(?:\.\d+)?)px").expect("translate pattern is valid")
});

/// Returns the x translation (px) encoded in a computed `transform` value.
///
/// Understands `matrix()`, `matrix3d()`, `translate()`, `translate3d()` and
/// `translateX()`. Anything else, including `none`, reads as `0.0`.
pub fn parse_translate_x(css: &str) -> f64 {
    let css = css.trim();
    if css.is_empty() || css == "none" {
        return 0.0;
    }

    if let Some(args) = function_args(css, "matrix3d") {
        return matrix_component(args, 12);
    }
    if let Some(args) = function_args(css, "matrix") {
        return matrix_component(args, 4);
    }

    TRANSLATE_PX
        .captures(css)
        .and_then(|caps| caps[1].parse::<f64>().ok())
        .unwrap_or(0.0)
}

/// Inner text of `name(...)` when `css` starts with that call.
fn function_args<'a>(css: &'a str, name: &str) -> Option<&'a str> {
    let rest = css.strip_prefix(name)?.strip_prefix('(')?;
    let end = rest.find(')')?;
    Some(&rest[..end])
}

fn matrix_component(args: &str, index: usize) -> f64 {
    args.split(',')
        .nth(index)
        .and_then(|v| v.trim().parse::<f64>().ok())
        .filter(|v| v.is_finite())
        .unwrap_or(0.0)
}
