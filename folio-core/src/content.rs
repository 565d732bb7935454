//! Static portfolio content shown inside the views.
//!
//! Content carries no transition logic; renderers pick what to show for a
//! view with [`Content::panel_for`].

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::registry::ViewId;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    pub name: String,
    pub title: String,
    pub summary: Vec<String>,
}

impl Default for Profile {
    fn default() -> Self {
        Self {
            name: "Your Name".into(),
            title: "Full Stack Developer".into(),
            summary: vec![
                "I build and maintain web applications with a strong focus on debugging and code quality.".into(),
                "Experienced in identifying issues, optimizing performance, and improving system reliability.".into(),
            ],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Link {
    pub label: String,
    pub href: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    pub number: String,
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub tech: Vec<String>,
    #[serde(default)]
    pub links: Vec<Link>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contact {
    pub title: String,
    pub subtitle: String,
    pub href: String,
}

/// Free-form panel for views without dedicated content.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Section {
    pub heading: String,
    #[serde(default)]
    pub subtitle: Option<String>,
    #[serde(default)]
    pub items: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Content {
    #[serde(default)]
    pub profile: Profile,
    #[serde(default = "default_skills")]
    pub skills: Vec<String>,
    #[serde(default = "default_projects")]
    pub projects: Vec<Project>,
    #[serde(default = "default_contacts")]
    pub contacts: Vec<Contact>,
    #[serde(default)]
    pub sections: BTreeMap<String, Section>,
}

impl Default for Content {
    fn default() -> Self {
        Self {
            profile: Profile::default(),
            skills: default_skills(),
            projects: default_projects(),
            contacts: default_contacts(),
            sections: BTreeMap::new(),
        }
    }
}

/// What a renderer should draw for a view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Panel<'a> {
    Hero(&'a Profile, &'a [String]),
    Projects(&'a [Project]),
    Contacts(&'a [Contact]),
    Skills(&'a [String]),
    Section(&'a Section),
    /// Nothing configured; show the view label.
    Placeholder,
}

impl Content {
    /// Configured sections win over the built-in mapping.
    pub fn panel_for(&self, view: &ViewId) -> Panel<'_> {
        if let Some(section) = self.sections.get(view.as_str()) {
            return Panel::Section(section);
        }
        match view.as_str() {
            "home" | "about" => Panel::Hero(&self.profile, &self.skills),
            "portfolio" | "projects" => Panel::Projects(&self.projects),
            "contact" => Panel::Contacts(&self.contacts),
            "skills" => Panel::Skills(&self.skills),
            _ => Panel::Placeholder,
        }
    }
}

fn default_skills() -> Vec<String> {
    [".NET", "PHP", "Flutter", "React", "Node.js"]
        .into_iter()
        .map(String::from)
        .collect()
}

fn project(number: &str, title: &str, description: &str, tech: &[&str], code_only: bool) -> Project {
    let mut links = vec![Link {
        label: "Code".into(),
        href: "https://github.com".into(),
    }];
    if !code_only {
        links.push(Link {
            label: "Demo".into(),
            href: "#".into(),
        });
    }
    Project {
        number: number.into(),
        title: title.into(),
        description: description.into(),
        tech: tech.iter().map(|t| t.to_string()).collect(),
        links,
    }
}

fn default_projects() -> Vec<Project> {
    vec![
        project(
            "01",
            "AI Analytics Platform",
            "Real-time data visualization dashboard with ML insights processing 10M+ events daily.",
            &["React", "Python", "TensorFlow", "AWS"],
            false,
        ),
        project(
            "02",
            "Collaborative Code Editor",
            "Real-time collaborative coding platform with WebSocket integration and syntax highlighting.",
            &["Next.js", "WebSocket", "Monaco", "Redis"],
            false,
        ),
        project(
            "03",
            "E-Commerce Microservices",
            "Scalable microservices architecture handling 50K+ daily transactions with event-driven design.",
            &["Node.js", "Kubernetes", "PostgreSQL", "RabbitMQ"],
            true,
        ),
        project(
            "04",
            "DevOps Automation Suite",
            "Infrastructure automation reducing deployment time by 70% with comprehensive monitoring.",
            &["Python", "Terraform", "Jenkins", "Prometheus"],
            true,
        ),
    ]
}

fn default_contacts() -> Vec<Contact> {
    vec![
        Contact {
            title: "Email".into(),
            subtitle: "you@example.com".into(),
            href: "mailto:you@example.com".into(),
        },
        Contact {
            title: "GitHub".into(),
            subtitle: "your-handle".into(),
            href: "https://github.com/your-handle".into(),
        },
        Contact {
            title: "LinkedIn".into(),
            subtitle: "Your Name".into(),
            href: "https://www.linkedin.com/in/your-handle".into(),
        },
    ]
}
