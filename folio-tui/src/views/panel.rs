//! A single portfolio view drawn according to its transition state.

use folio_core::{Panel, ViewVisualState};
use folio_core::content::{Contact, Profile, Project, Section};
use ratatui::{
    Frame,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
};

use super::traits::ViewRenderer;
use crate::Theme;

/// The visible body panel.
///
/// While a view is leaving it is drawn dimmed; a view that has just been
/// swapped in keeps an accent border until the lock is released.
#[derive(Debug, Clone)]
pub struct PanelView<'a> {
    pub label: &'a str,
    pub panel: Panel<'a>,
    pub state: ViewVisualState,
    /// The view was swapped in and the lock is still held.
    pub entering: bool,
}

impl<'a> PanelView<'a> {
    pub fn new(label: &'a str, panel: Panel<'a>, state: ViewVisualState) -> Self {
        Self {
            label,
            panel,
            state,
            entering: false,
        }
    }

    pub fn entering(mut self, entering: bool) -> Self {
        self.entering = entering;
        self
    }

    fn body(&self, theme: &Theme) -> Vec<Line<'a>> {
        match self.panel {
            Panel::Hero(profile, skills) => hero_lines(profile, skills, theme),
            Panel::Projects(projects) => project_lines(projects, theme),
            Panel::Contacts(contacts) => contact_lines(contacts, theme),
            Panel::Skills(skills) => vec![badge_line(skills, theme)],
            Panel::Section(section) => section_lines(section, theme),
            Panel::Placeholder => vec![Line::styled(
                format!("{} is coming soon.", self.label),
                Style::default().fg(theme.muted),
            )],
        }
    }
}

impl ViewRenderer for PanelView<'_> {
    fn render(&self, frame: &mut Frame, area: Rect, theme: &Theme) {
        let leaving = self.state == ViewVisualState::Leaving;
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(theme.panel_border(leaving, self.entering))
            .title(format!(" {} ", self.label));

        let mut paragraph = Paragraph::new(self.body(theme))
            .block(block)
            .wrap(Wrap { trim: true });
        if leaving {
            paragraph = paragraph.style(Style::default().add_modifier(Modifier::DIM));
        }
        frame.render_widget(paragraph, area);
    }

    fn title(&self) -> &str {
        self.label
    }
}

fn hero_lines<'a>(profile: &'a Profile, skills: &'a [String], theme: &Theme) -> Vec<Line<'a>> {
    let mut lines = vec![
        Line::styled(
            profile.name.as_str(),
            Style::default()
                .fg(theme.accent)
                .add_modifier(Modifier::BOLD),
        ),
        Line::styled(profile.title.as_str(), Style::default().fg(theme.secondary)),
        Line::raw(""),
    ];
    lines.extend(
        profile
            .summary
            .iter()
            .map(|p| Line::styled(p.as_str(), Style::default().fg(theme.fg))),
    );
    lines.push(Line::raw(""));
    lines.push(badge_line(skills, theme));
    lines
}

fn badge_line<'a>(skills: &'a [String], theme: &Theme) -> Line<'a> {
    let mut spans = Vec::with_capacity(skills.len() * 2);
    for (index, skill) in skills.iter().enumerate() {
        if index > 0 {
            spans.push(Span::raw(" "));
        }
        spans.push(Span::styled(
            format!("‹{skill}›"),
            Style::default().fg(theme.secondary),
        ));
    }
    Line::from(spans)
}

fn project_lines<'a>(projects: &'a [Project], theme: &Theme) -> Vec<Line<'a>> {
    let mut lines = Vec::new();
    for project in projects {
        lines.push(Line::from(vec![
            Span::styled(
                format!("{}  ", project.number),
                Style::default().fg(theme.secondary),
            ),
            Span::styled(
                project.title.as_str(),
                Style::default().fg(theme.fg).add_modifier(Modifier::BOLD),
            ),
        ]));
        lines.push(Line::styled(
            project.description.as_str(),
            Style::default().fg(theme.fg),
        ));
        if !project.tech.is_empty() {
            lines.push(Line::styled(
                project.tech.join(" · "),
                Style::default().fg(theme.muted),
            ));
        }
        if !project.links.is_empty() {
            let links: Vec<_> = project
                .links
                .iter()
                .map(|link| format!("{} ↗ {}", link.label, link.href))
                .collect();
            lines.push(Line::styled(
                links.join("   "),
                Style::default().fg(theme.accent),
            ));
        }
        lines.push(Line::raw(""));
    }
    lines
}

fn contact_lines<'a>(contacts: &'a [Contact], theme: &Theme) -> Vec<Line<'a>> {
    contacts
        .iter()
        .map(|contact| {
            Line::from(vec![
                Span::styled(
                    format!("{:<10}", contact.title),
                    Style::default().fg(theme.fg).add_modifier(Modifier::BOLD),
                ),
                Span::styled(contact.subtitle.as_str(), Style::default().fg(theme.accent)),
                Span::styled(
                    format!("  {}", contact.href),
                    Style::default().fg(theme.muted),
                ),
            ])
        })
        .collect()
}

fn section_lines<'a>(section: &'a Section, theme: &Theme) -> Vec<Line<'a>> {
    let mut lines = vec![Line::styled(
        section.heading.as_str(),
        Style::default()
            .fg(theme.accent)
            .add_modifier(Modifier::BOLD),
    )];
    if let Some(subtitle) = &section.subtitle {
        lines.push(Line::styled(
            subtitle.as_str(),
            Style::default().fg(theme.secondary),
        ));
    }
    lines.push(Line::raw(""));
    lines.extend(
        section
            .items
            .iter()
            .map(|item| Line::styled(format!("• {item}"), Style::default().fg(theme.fg))),
    );
    lines
}
