//! Tool selection
//!
//! A `ToolFilter` narrows a tool list in four stages, each optional:
//! service → name pattern → include list → exclude list. All stages must
//! pass for a tool to survive, and survivors keep their original order.

use std::collections::HashSet;
use std::sync::Arc;

use regex::Regex;

use crate::types::ToolDescriptor;

/// Filter for tool selection
#[derive(Debug, Clone, Default)]
pub struct ToolFilter {
    /// Exact service name
    service: Option<String>,
    /// Pattern anchored at the start of the tool name
    name_pattern: Option<Regex>,
    /// If set, only include tools with these names
    include: Option<HashSet<String>>,
    /// Exclude tools with these names
    exclude: HashSet<String>,
}

impl ToolFilter {
    /// A filter that keeps every tool
    pub fn new() -> Self {
        Self::default()
    }

    /// Keep only tools of one service
    pub fn with_service(mut self, service: impl Into<String>) -> Self {
        self.service = Some(service.into());
        self
    }

    /// Keep only tools whose name matches `pattern` from its first character.
    ///
    /// The match is anchored at the start only: `blog.*` keeps
    /// `blog.Blog.List` but not `myblog.Blog.List`.
    pub fn with_name_pattern(mut self, pattern: &str) -> Result<Self, regex::Error> {
        self.name_pattern = Some(Regex::new(&format!("^(?:{})", pattern))?);
        Ok(self)
    }

    /// Include only specific tools. An empty list selects nothing.
    pub fn with_include(mut self, names: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.include = Some(names.into_iter().map(Into::into).collect());
        self
    }

    /// Exclude specific tools
    pub fn with_exclude(mut self, names: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.exclude = names.into_iter().map(Into::into).collect();
        self
    }

    /// True when no stage is set
    pub fn is_empty(&self) -> bool {
        self.service.is_none()
            && self.name_pattern.is_none()
            && self.include.is_none()
            && self.exclude.is_empty()
    }

    /// Check if a tool matches this filter
    pub fn matches(&self, tool: &ToolDescriptor) -> bool {
        if let Some(ref service) = self.service {
            if tool.service != *service {
                return false;
            }
        }

        if let Some(ref pattern) = self.name_pattern {
            if !pattern.is_match(&tool.name) {
                return false;
            }
        }

        if let Some(ref include) = self.include {
            if !include.contains(&tool.name) {
                return false;
            }
        }

        !self.exclude.contains(&tool.name)
    }

    /// Return the matching tools as a new list, in their original order
    pub fn select(&self, tools: &[Arc<ToolDescriptor>]) -> Vec<Arc<ToolDescriptor>> {
        tools.iter().filter(|t| self.matches(t)).cloned().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tool(name: &str, service: &str) -> Arc<ToolDescriptor> {
        Arc::new(ToolDescriptor {
            name: name.to_string(),
            service: service.to_string(),
            endpoint: name.trim_start_matches(&format!("{}.", service)).to_string(),
            description: String::new(),
            example: None,
            scopes: None,
            metadata: Default::default(),
        })
    }

    fn tools() -> Vec<Arc<ToolDescriptor>> {
        vec![tool("A", "users"), tool("B", "users"), tool("C", "blog")]
    }

    fn names(tools: &[Arc<ToolDescriptor>]) -> Vec<&str> {
        tools.iter().map(|t| t.name.as_str()).collect()
    }

    #[test]
    fn test_empty_filter_keeps_everything() {
        let filter = ToolFilter::new();
        assert!(filter.is_empty());
        assert_eq!(names(&filter.select(&tools())), vec!["A", "B", "C"]);
    }

    #[test]
    fn test_service_filter() {
        let selected = ToolFilter::new().with_service("users").select(&tools());
        assert_eq!(names(&selected), vec!["A", "B"]);
    }

    #[test]
    fn test_service_and_exclude() {
        let selected = ToolFilter::new()
            .with_service("users")
            .with_exclude(["A"])
            .select(&tools());
        assert_eq!(names(&selected), vec!["B"]);
    }

    #[test]
    fn test_include() {
        let selected = ToolFilter::new().with_include(["C"]).select(&tools());
        assert_eq!(names(&selected), vec!["C"]);
    }

    #[test]
    fn test_empty_include_selects_nothing() {
        let selected = ToolFilter::new()
            .with_include(Vec::<String>::new())
            .select(&tools());
        assert!(selected.is_empty());
    }

    #[test]
    fn test_include_unknown_name() {
        let selected = ToolFilter::new().with_include(["Z"]).select(&tools());
        assert!(selected.is_empty());
    }

    #[test]
    fn test_name_pattern_anchored_at_start() {
        let list = vec![
            tool("blog.Blog.List", "blog"),
            tool("users.Users.Get", "users"),
            tool("myblog.Blog.List", "myblog"),
            tool("blog.Blog.Create", "blog"),
        ];

        let filter = ToolFilter::new().with_name_pattern("blog.*").unwrap();
        assert_eq!(
            names(&filter.select(&list)),
            vec!["blog.Blog.List", "blog.Blog.Create"]
        );

        // Not anchored at the end
        let filter = ToolFilter::new().with_name_pattern("users").unwrap();
        assert_eq!(names(&filter.select(&list)), vec!["users.Users.Get"]);

        // Alternation stays anchored
        let filter = ToolFilter::new().with_name_pattern("users|blog").unwrap();
        assert_eq!(filter.select(&list).len(), 3);
    }

    #[test]
    fn test_name_pattern_without_matches() {
        let filter = ToolFilter::new().with_name_pattern("payments").unwrap();
        assert!(filter.select(&tools()).is_empty());
    }

    #[test]
    fn test_invalid_pattern() {
        assert!(ToolFilter::new().with_name_pattern("users(").is_err());
    }

    #[test]
    fn test_all_stages_compose() {
        let list = vec![
            tool("users.Users.Get", "users"),
            tool("users.Users.Create", "users"),
            tool("users.Admin.Reset", "users"),
            tool("blog.Blog.List", "blog"),
        ];

        let filter = ToolFilter::new()
            .with_service("users")
            .with_name_pattern(r"users\.Users\.")
            .unwrap()
            .with_include(["users.Users.Get", "users.Users.Create", "blog.Blog.List"])
            .with_exclude(["users.Users.Create"]);

        assert_eq!(names(&filter.select(&list)), vec!["users.Users.Get"]);
    }

    #[test]
    fn test_select_does_not_touch_input() {
        let list = tools();
        let _ = ToolFilter::new().with_service("blog").select(&list);
        assert_eq!(names(&list), vec!["A", "B", "C"]);
    }
}
