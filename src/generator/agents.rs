//! Static table of the design agents and the prompts that define them

use serde::Serialize;
use std::collections::HashMap;

/// Well-known agent names
pub struct AgentName;

impl AgentName {
    pub const ARCHITECT: &'static str = "architect";
    pub const STYLE_CURATOR: &'static str = "style-curator";
    pub const CODE_GENERATOR: &'static str = "code-generator";
    pub const QA_SPECIALIST: &'static str = "qa-specialist";
    pub const EXPORTER: &'static str = "exporter";

    /// Agent used whenever nothing better matches
    pub const DEFAULT: &'static str = Self::ARCHITECT;
}

/// A named role with a fixed instruction template
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Agent {
    pub name: String,
    pub role: String,
    pub goal: String,
    pub backstory: String,
    pub system_prompt: String,
}

impl Agent {
    fn new(name: &str, role: &str, goal: &str, backstory: &str, system_prompt: &str) -> Self {
        Self {
            name: name.to_string(),
            role: role.to_string(),
            goal: goal.to_string(),
            backstory: backstory.to_string(),
            system_prompt: system_prompt.to_string(),
        }
    }
}

/// Immutable name -> agent lookup, built once at start-up and shared by reference
#[derive(Debug, Clone)]
pub struct AgentRegistry {
    agents: HashMap<String, Agent>,
    /// Insertion order, for stable listings
    order: Vec<String>,
}

impl Default for AgentRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl AgentRegistry {
    pub fn new() -> Self {
        let table = vec![
            Agent::new(
                AgentName::ARCHITECT,
                "UI/UX Architect",
                "Design intuitive and scalable user interface structures",
                "You are an experienced UI architect with deep knowledge of design patterns, user experience principles, and modern web technologies.",
                "You are a UI Architect. Analyze user requirements and create logical component structures, layouts, and user flows. Focus on usability, accessibility, and scalability. Provide the output as a JSON object with keys: components, layout, navigation.",
            ),
            Agent::new(
                AgentName::STYLE_CURATOR,
                "Creative Design Director",
                "Create visually stunning and cohesive design systems",
                "You are a creative visionary with expertise in color theory, typography, and modern design trends.",
                "You are a Style Curator. Create beautiful, modern design systems with cohesive color palettes, typography, and visual themes. Stay current with design trends while ensuring usability. Provide 4 distinct visual themes as a JSON array of objects, each with keys: name, description, colors (object with primary, secondary, background, surface, accent), typography (object with heading, body), spacing (object with base, tight, loose), components (object with button, card).",
            ),
            Agent::new(
                AgentName::CODE_GENERATOR,
                "Full-Stack Developer",
                "Transform designs into clean, performant, and maintainable code",
                "You are a skilled developer with expertise in modern web technologies and best practices.",
                "You are a Code Generator. Convert UI designs into clean, semantic HTML, efficient CSS, and interactive JavaScript. Follow modern web standards and best practices. For each of the 4 themes provided, generate the HTML, CSS, and JS code. Provide the output as a JSON array of objects, each with keys: themeName, html, css, js.",
            ),
            Agent::new(
                AgentName::QA_SPECIALIST,
                "QA Engineer & Accessibility Expert",
                "Ensure code quality, accessibility, and performance standards",
                "You are a meticulous QA engineer with deep expertise in web standards and accessibility guidelines.",
                "You are a QA Specialist. Review code for quality, accessibility (WCAG compliance), performance, and cross-browser compatibility. Provide actionable feedback and recommendations. For each of the 4 code implementations, provide a QA score (0-1) and an array of accessibility issues. Provide the output as a JSON array of objects, each with keys: themeName, qaScore, accessibilityIssues (array of strings).",
            ),
            Agent::new(
                AgentName::EXPORTER,
                "Release Engineer",
                "Package finished designs as ready-to-run projects",
                "You are a pragmatic engineer who ships front-end projects to React, Vue, Next.js and plain static hosting.",
                "You are an Exporter. Help the user package a finished UI design as a downloadable project. Explain the available targets (vanilla HTML/CSS/JS, React, Vue, Next.js), what files each contains, and how to run and deploy them.",
            ),
        ];

        let order = table.iter().map(|a| a.name.clone()).collect();
        let agents = table.into_iter().map(|a| (a.name.clone(), a)).collect();
        Self { agents, order }
    }

    /// Look up an agent; `None` is an ordinary outcome the caller must handle
    pub fn lookup(&self, name: &str) -> Option<&Agent> {
        self.agents.get(name)
    }

    pub fn default_agent(&self) -> &Agent {
        // The table always carries the default entry
        &self.agents[AgentName::DEFAULT]
    }

    /// `name` if registered, otherwise the default agent
    pub fn lookup_or_default(&self, name: &str) -> &Agent {
        self.lookup(name).unwrap_or_else(|| self.default_agent())
    }

    /// Agents in table order
    pub fn agents(&self) -> impl Iterator<Item = &Agent> {
        self.order.iter().filter_map(|name| self.agents.get(name))
    }

    pub fn len(&self) -> usize {
        self.agents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.agents.is_empty()
    }
}
