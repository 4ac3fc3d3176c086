// Copyright (c) Asymptotic Labs
// SPDX-License-Identifier: Apache-2.0

//! Naming of generated classes.
//!
//! Both functions are total: malformed qualified names are not validated here
//! and simply produce malformed names.

/// Simple name of the class generated for `source_qualified_name`.
///
/// The package prefix is stripped and nested type separators are flattened
/// to `$`, so `com.example.Outer.Inner` with suffix `$$Loader` in package
/// `com.example` yields `Outer$Inner$$Loader`.
pub fn generated_class_name(package_name: &str, source_qualified_name: &str, suffix: &str) -> String {
    let local = if package_name.is_empty() {
        source_qualified_name
    } else {
        source_qualified_name
            .strip_prefix(package_name)
            .and_then(|rest| rest.strip_prefix('.'))
            .unwrap_or(source_qualified_name)
    };
    format!("{}{}", local.replace('.', "$"), suffix)
}

/// Fully-qualified name of a class, omitting the dot for the default package.
pub fn fqcn(package_name: &str, class_name: &str) -> String {
    if package_name.is_empty() {
        class_name.to_string()
    } else {
        format!("{package_name}.{class_name}")
    }
}

/// Last segment of a dotted name.
pub fn simple_name(qualified_name: &str) -> &str {
    qualified_name
        .rsplit_once('.')
        .map_or(qualified_name, |(_, name)| name)
}
