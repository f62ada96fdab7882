//! Text rendering of the version header

use crate::template::HeaderTemplate;
use std::fmt::Write;
use version_info::VersionInfo;

/// Column at which `#define` values start
const NAME_WIDTH: usize = 28;

pub const REMOTE_ORIGIN_URL: &str = "GIT_REMOTE_ORIGIN_URL";
pub const BRANCH: &str = "GIT_BRANCH";
pub const VERSION_SHORT: &str = "GIT_VERSION_SHORT";
pub const VERSION_LONG: &str = "GIT_VERSION_LONG";

const BANNER: &str = "\
/******************************************************************************
 *********** WARNING: AUTO GENERATED FILE, DO NOT EDIT IT MANUALLY! ***********
 *****************************************************************************/
";

const REMOTE_DOC: &str = "\
/**
 * @brief The remote origin url defined when starting the build
 */
";

const BRANCH_DOC: &str = "\
/**
 * @brief The branch selected when starting the build
 */
";

const SHORT_DOC: &str = "\
/**
 * @brief The latest git tag when starting the build.
 *
 * WARNING: Would be a empty string if there is not at least one tag on the
 *          current branch. In this case GIT_VERSION_SHORT is defined as
 *          GIT_VERSION_LONG to avoid compiler errors.
 */
";

const LONG_DOC: &str = "\
/**
 * @brief The latest git tag including offset and short hash when starting the
 * build.
 *
 * If this is equal to GIT_VERSION_SHORT the build is based on a clean tag
 * without any changes.
 */
";

/// Render the complete header for `info`.
///
/// The output depends only on its inputs, so unchanged repository state
/// renders byte-identical text.
pub fn render_header(info: &VersionInfo, template: &HeaderTemplate) -> String {
    let mut out = String::new();

    if let Some(license) = &template.license {
        out.push_str(&license_comment(license));
        out.push('\n');
    }

    out.push_str(BANNER);
    out.push('\n');
    let _ = writeln!(out, "#ifndef {}", template.guard);
    let _ = writeln!(out, "#define {}", template.guard);

    let short = if info.has_tag() {
        quote(&info.short_version)
    } else {
        VERSION_LONG.to_string()
    };

    for (doc, name, value) in [
        (REMOTE_DOC, REMOTE_ORIGIN_URL, quote(&info.remote_origin_url)),
        (BRANCH_DOC, BRANCH, quote(&info.branch)),
        (SHORT_DOC, VERSION_SHORT, short),
        (LONG_DOC, VERSION_LONG, quote(&info.long_version)),
    ] {
        out.push('\n');
        out.push_str(doc);
        out.push_str(&define(name, &value));
    }

    let _ = writeln!(out, "\n#endif /* {} */", template.guard);
    out
}

fn define(name: &str, value: &str) -> String {
    format!("#define {:<width$}{}\n", name, value, width = NAME_WIDTH)
}

fn license_comment(license: &str) -> String {
    let mut comment = String::from("/*\n");
    for line in license.trim_end().lines() {
        let line = line.trim_end();
        if line.is_empty() {
            comment.push_str(" *\n");
        } else {
            let _ = writeln!(comment, " * {}", line);
        }
    }
    comment.push_str(" */\n");
    comment
}

/// Quote `value` as a C string literal.
pub fn quote(value: &str) -> String {
    let mut quoted = String::with_capacity(value.len() + 2);
    quoted.push('"');
    for c in value.chars() {
        match c {
            '\\' => quoted.push_str("\\\\"),
            '"' => quoted.push_str("\\\""),
            '\n' => quoted.push_str("\\n"),
            '\r' => quoted.push_str("\\r"),
            '\t' => quoted.push_str("\\t"),
            // Octal keeps the escape from absorbing following hex digits
            c if c.is_ascii_control() => {
                let _ = write!(quoted, "\\{:03o}", c as u32);
            }
            c => quoted.push(c),
        }
    }
    quoted.push('"');
    quoted
}
