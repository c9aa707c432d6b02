use std::fmt::Write;

use super::ScanConfig;

const TYPE_ANNOTATION: &str = "/** @type {import('tailwindcss').Config} */";

/// Render `config` as a CommonJS `tailwind.config.js` module.
pub fn render_tailwind_config(config: &ScanConfig) -> String {
    let mut out = String::new();
    // Writing to a String cannot fail.
    let _ = write_config(&mut out, config);
    out
}

fn write_config(out: &mut String, config: &ScanConfig) -> std::fmt::Result {
    writeln!(out, "{}", TYPE_ANNOTATION)?;
    writeln!(out, "module.exports = {{")?;

    writeln!(out, "  content: [")?;
    for glob in &config.content {
        writeln!(out, "    {},", js_string(glob))?;
    }
    writeln!(out, "  ],")?;

    let theme = &config.theme;
    writeln!(out, "  theme: {{")?;
    writeln!(
        out,
        "    extend: {},",
        serde_json::to_string(&theme.extend).unwrap_or_else(|_| "{}".to_string())
    )?;
    writeln!(out, "    container: {{")?;
    writeln!(out, "      center: {},", theme.container.center)?;
    writeln!(out, "      padding: {{")?;
    let padding = &theme.container.padding;
    writeln!(out, "        DEFAULT: {},", js_string(&padding.default))?;
    for (breakpoint, value) in &padding.breakpoints {
        writeln!(
            out,
            "        {}: {},",
            js_key(breakpoint.key()),
            js_string(value)
        )?;
    }
    writeln!(out, "      }},")?;
    writeln!(out, "    }},")?;
    writeln!(out, "  }},")?;

    writeln!(out, "  plugins: [")?;
    for plugin in &config.plugins {
        writeln!(out, "    require({}),", js_string(plugin.package()))?;
    }
    writeln!(out, "  ],")?;
    writeln!(out, "}}")
}

/// Double-quoted JS string literal. JSON string escaping is valid JS.
fn js_string(s: &str) -> String {
    serde_json::Value::String(s.to_string()).to_string()
}

/// Object key, quoted only when it is not a plain identifier (e.g. `2xl`).
fn js_key(key: &str) -> String {
    let is_ident = key
        .chars()
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_' || c == '$')
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$');
    if is_ident {
        key.to_string()
    } else {
        js_string(key)
    }
}
