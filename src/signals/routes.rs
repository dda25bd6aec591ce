//! Route and service declaration extraction.
//!
//! Only files whose path suggests routes/controllers/handlers are parsed.
//! Per-language regexes recover route registrations; class/type declarations
//! named like controllers or services become `kind:"service"` entries.

use regex::Regex;

use crate::error::Result;
use crate::scanner::FileRecord;

use super::types::{RouteKind, RouteOrService, SignalBundle};
use super::{ExtractContext, SignalExtractor};

const ROUTE_HINTS: &[&str] = &["route", "controller", "handler", "service", "/api/"];

pub struct RoutesExtractor {
    js_route: Regex,
    js_service: Regex,
    go_route: Regex,
    go_service: Regex,
    php_route: Regex,
    php_service: Regex,
    py_route: Regex,
    py_django_path: Regex,
    py_service: Regex,
}

impl Default for RoutesExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl RoutesExtractor {
    #[must_use]
    pub fn new() -> Self {
        Self {
            // Express/Fastify/Koa style registrations.
            js_route: Regex::new(
                r#"(?:app|router|fastify|server|api)\.(?:get|post|put|delete|patch|options|head|all)\(\s*['"`]([^'"`]+)['"`]"#,
            )
            .expect("valid js route regex"),
            js_service: Regex::new(r"class\s+(\w+(?:Controller|Service))\b")
                .expect("valid js service regex"),
            // Gorilla Mux, Gin, Echo, Chi, net/http.
            go_route: Regex::new(
                r#"\.(?:HandleFunc|Handle|GET|POST|PUT|DELETE|PATCH|OPTIONS|Any)\(\s*"([^"]+)""#,
            )
            .expect("valid go route regex"),
            go_service: Regex::new(r"type\s+(\w*Service\w*)\s+(?:struct|interface)")
                .expect("valid go service regex"),
            // Laravel Route facade, resource routes included.
            php_route: Regex::new(
                r#"Route::(?:get|post|put|delete|patch|any|match|resource|apiResource)\(\s*['"]([^'"]+)['"]"#,
            )
            .expect("valid php route regex"),
            php_service: Regex::new(r"class\s+(\w+(?:Controller|Service))\b")
                .expect("valid php service regex"),
            // Flask decorators.
            py_route: Regex::new(r#"@\w+\.route\(\s*['"]([^'"]+)['"]"#)
                .expect("valid flask route regex"),
            // Django url patterns.
            py_django_path: Regex::new(r#"\bpath\(\s*['"]([^'"]*)['"]"#)
                .expect("valid django path regex"),
            py_service: Regex::new(r"class\s+(\w+(?:View|ViewSet))\b")
                .expect("valid python service regex"),
        }
    }

    fn scan_file(&self, record: &FileRecord, text: &str, out: &mut Vec<RouteOrService>) {
        let mut push = |kind: RouteKind, name: &str| {
            let entry = RouteOrService {
                kind,
                path: record.path.clone(),
                name: name.to_string(),
            };
            if !out.contains(&entry) {
                out.push(entry);
            }
        };

        match record.extension.as_str() {
            ".ts" | ".tsx" | ".js" | ".jsx" | ".mjs" | ".cjs" => {
                for caps in self.js_route.captures_iter(text) {
                    push(RouteKind::Route, &caps[1]);
                }
                for caps in self.js_service.captures_iter(text) {
                    push(RouteKind::Service, &caps[1]);
                }
                if let Some(name) = nextjs_route(&record.path) {
                    push(RouteKind::Route, &name);
                }
            }
            ".go" => {
                for caps in self.go_route.captures_iter(text) {
                    push(RouteKind::Route, &caps[1]);
                }
                for caps in self.go_service.captures_iter(text) {
                    push(RouteKind::Service, &caps[1]);
                }
            }
            ".php" => {
                for caps in self.php_route.captures_iter(text) {
                    push(RouteKind::Route, &caps[1]);
                }
                for caps in self.php_service.captures_iter(text) {
                    push(RouteKind::Service, &caps[1]);
                }
            }
            ".py" => {
                for caps in self.py_route.captures_iter(text) {
                    push(RouteKind::Route, &caps[1]);
                }
                if record.basename == "urls.py" {
                    for caps in self.py_django_path.captures_iter(text) {
                        push(RouteKind::Route, &caps[1]);
                    }
                }
                for caps in self.py_service.captures_iter(text) {
                    push(RouteKind::Service, &caps[1]);
                }
            }
            _ => {}
        }
    }
}

impl SignalExtractor for RoutesExtractor {
    fn name(&self) -> &'static str {
        "routes"
    }

    fn extract(&self, ctx: &ExtractContext<'_>, bundle: &mut SignalBundle) -> Result<()> {
        for record in ctx.files() {
            ctx.checkpoint()?;
            if !is_route_candidate(record) {
                continue;
            }
            let Some(text) = ctx.read(&record.path) else {
                continue;
            };
            self.scan_file(record, &text, &mut bundle.routes_services);
        }
        Ok(())
    }
}

fn is_route_candidate(record: &FileRecord) -> bool {
    let lower = record.path.to_ascii_lowercase();
    ROUTE_HINTS.iter().any(|h| lower.contains(h))
        || record.basename == "urls.py"
        || record.basename == "views.py"
        || nextjs_route(&record.path).is_some()
}

/// Next.js file-based routes: `pages/**` maps by filename, `app/**/route.*`
/// and `app/**/page.*` by directory.
fn nextjs_route(path: &str) -> Option<String> {
    let (prefix, rest) = path
        .strip_prefix("pages/")
        .map(|r| ("pages", r))
        .or_else(|| path.strip_prefix("app/").map(|r| ("app", r)))?;

    let stem = rest.rsplit_once('.').map_or(rest, |(s, _)| s);
    match prefix {
        "pages" => {
            let route = stem.strip_suffix("/index").unwrap_or(stem);
            let route = if route == "index" { "" } else { route };
            Some(format!("/{route}"))
        }
        _ => {
            let dir = stem.strip_suffix("/route").or_else(|| stem.strip_suffix("/page"))?;
            Some(format!("/{dir}"))
        }
    }
}

#[cfg(test)]
#[path = "routes_tests.rs"]
mod tests;
