//! Rendering of the `plugins.js` and `support.js` entry points the runner loads.
//!
//! Both scripts are a pure function of the ordered contribution lists: one
//! `require` line per contributing suite, in registration order.

/// First line of every generated loader script.
pub const GENERATED_MARKER: &str =
    "// Automatically generated by cypack. Manual edits are lost on the next registration.";

/// Renders the plugin loader.
///
/// The script exports a single `(on, config)` function that forwards the
/// runner's hooks to every contributing suite's `plugins/<name>/index.js`.
/// With no contributions the exported function has an empty body.
pub fn plugin_loader<S: AsRef<str>>(names: &[S]) -> String {
    let mut script = String::new();
    script.push_str(GENERATED_MARKER);
    script.push('\n');
    script.push_str("module.exports = (on, config) => {\n");
    for name in names {
        script.push_str(&format!(
            "  require('./plugins/{}/index.js')(on, config);\n",
            name.as_ref()
        ));
    }
    script.push_str("};\n");
    script
}

/// Renders the support loader.
///
/// Each contributing suite's `support/<name>/index.js` is required for its side
/// effects only. With no contributions the file holds just the marker comment.
pub fn support_loader<S: AsRef<str>>(names: &[S]) -> String {
    let mut script = String::new();
    script.push_str(GENERATED_MARKER);
    script.push('\n');
    for name in names {
        script.push_str(&format!(
            "require('./support/{}/index.js');\n",
            name.as_ref()
        ));
    }
    script
}
