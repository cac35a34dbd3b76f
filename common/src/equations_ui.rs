//! Equations sidebar shared by the visualizations
//!
//! A topic crate groups its formulas into [`EquationSection`]s and shows
//! them with a [`Sidebar`]. Binaries that walk through a lesson highlight
//! the section that belongs to the current step; the others stay collapsed.

use egui::{Color32, Context, FontFamily, FontId, RichText, Ui};

/// Equation entry with label and formula
pub struct Equation {
    pub name: &'static str,
    pub formula: &'static str,
    pub description: &'static str,
}

/// A titled group of equations
pub struct EquationSection {
    pub heading: &'static str,
    pub equations: &'static [Equation],
}

const TITLE_COLOR: Color32 = Color32::from_rgb(100, 200, 255);
const SECTION_COLOR: Color32 = Color32::from_rgb(255, 200, 100);
const ACTIVE_COLOR: Color32 = Color32::from_rgb(255, 235, 120);
const SYMBOL_COLOR: Color32 = Color32::from_rgb(150, 255, 150);
const FORMULA_COLOR: Color32 = Color32::from_rgb(200, 220, 255);

/// Right-hand panel listing equation sections and a variable legend
pub struct Sidebar<'a> {
    title: &'a str,
    sections: &'a [EquationSection],
    variables: &'a [(&'a str, &'a str)],
    active: Option<usize>,
}

impl<'a> Sidebar<'a> {
    pub fn new(title: &'a str, sections: &'a [EquationSection]) -> Self {
        Self {
            title,
            sections,
            variables: &[],
            active: None,
        }
    }

    pub fn variables(mut self, variables: &'a [(&'a str, &'a str)]) -> Self {
        self.variables = variables;
        self
    }

    /// Expand section `index` and collapse the rest; out of range clears it
    pub fn active(mut self, index: usize) -> Self {
        self.active = (index < self.sections.len()).then_some(index);
        self
    }

    pub fn active_heading(&self) -> Option<&'static str> {
        self.active.map(|i| self.sections[i].heading)
    }

    /// Whether section `index` is drawn expanded this frame
    pub fn is_open(&self, index: usize) -> bool {
        index < self.sections.len() && self.active.map_or(true, |active| active == index)
    }

    pub fn show(&self, ctx: &Context) {
        egui::SidePanel::right("equations_panel")
            .min_width(280.0)
            .max_width(350.0)
            .resizable(true)
            .show(ctx, |ui| {
                ui.vertical_centered(|ui| {
                    ui.heading(RichText::new(self.title).color(TITLE_COLOR));
                });
                ui.add_space(8.0);

                egui::ScrollArea::vertical().show(ui, |ui| {
                    for (i, section) in self.sections.iter().enumerate() {
                        self.section(ui, i, section);
                    }
                    if !self.variables.is_empty() {
                        ui.separator();
                        variable_legend(ui, self.variables);
                    }
                });
            });
    }

    fn section(&self, ui: &mut Ui, index: usize, section: &EquationSection) {
        let color = if self.active == Some(index) {
            ACTIVE_COLOR
        } else {
            SECTION_COLOR
        };
        let header = egui::CollapsingHeader::new(RichText::new(section.heading).strong().color(color))
            .id_source(("equation_section", index));
        // Only force the state when stepping through a lesson
        let header = match self.active {
            Some(_) => header.open(Some(self.is_open(index))),
            None => header.default_open(true),
        };
        header.show(ui, |ui| {
            for eq in section.equations {
                equation_card(ui, eq);
                ui.add_space(6.0);
            }
        });
    }
}

fn equation_card(ui: &mut Ui, eq: &Equation) {
    ui.group(|ui| {
        ui.label(RichText::new(eq.name).strong().color(Color32::WHITE));
        ui.label(
            RichText::new(eq.formula)
                .font(FontId::new(16.0, FontFamily::Monospace))
                .color(FORMULA_COLOR),
        );
        if !eq.description.is_empty() {
            ui.label(RichText::new(eq.description).small().color(Color32::GRAY));
        }
    });
}

fn variable_legend(ui: &mut Ui, variables: &[(&str, &str)]) {
    ui.label(RichText::new("Variables").strong().color(SECTION_COLOR));
    egui::Grid::new("variable_legend")
        .num_columns(2)
        .spacing([12.0, 2.0])
        .show(ui, |ui| {
            for (symbol, meaning) in variables {
                ui.label(
                    RichText::new(*symbol)
                        .color(SYMBOL_COLOR)
                        .font(FontId::new(14.0, FontFamily::Monospace)),
                );
                ui.label(RichText::new(*meaning).color(Color32::LIGHT_GRAY));
                ui.end_row();
            }
        });
}

/// One-line status bar along the top of the window
pub fn draw_status_bar(ctx: &Context, paused: bool, add_contents: impl FnOnce(&mut Ui)) {
    egui::TopBottomPanel::top("status").show(ctx, |ui| {
        ui.horizontal(|ui| {
            add_contents(ui);
            if paused {
                ui.separator();
                ui.label(RichText::new("PAUSED").color(Color32::YELLOW));
            }
        });
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    const FIRST: &[Equation] = &[Equation {
        name: "Energy",
        formula: "E = hν",
        description: "",
    }];
    const SECOND: &[Equation] = &[Equation {
        name: "Momentum",
        formula: "p = h/λ",
        description: "de Broglie",
    }];
    const SECTIONS: &[EquationSection] = &[
        EquationSection {
            heading: "Light",
            equations: FIRST,
        },
        EquationSection {
            heading: "Matter",
            equations: SECOND,
        },
    ];

    #[test]
    fn test_all_sections_open_without_highlight() {
        let sidebar = Sidebar::new("Test", SECTIONS);
        assert!(sidebar.is_open(0));
        assert!(sidebar.is_open(1));
        assert!(!sidebar.is_open(2));
        assert_eq!(sidebar.active_heading(), None);
    }

    #[test]
    fn test_highlight_collapses_other_sections() {
        let sidebar = Sidebar::new("Test", SECTIONS).active(1);
        assert!(!sidebar.is_open(0));
        assert!(sidebar.is_open(1));
        assert_eq!(sidebar.active_heading(), Some("Matter"));

        let cleared = Sidebar::new("Test", SECTIONS).active(7);
        assert_eq!(cleared.active_heading(), None);
        assert!(cleared.is_open(0));
    }

    #[test]
    fn test_sidebar_takes_space_on_the_right() {
        let ctx = Context::default();
        let input = egui::RawInput {
            screen_rect: Some(egui::Rect::from_min_size(
                egui::Pos2::ZERO,
                egui::vec2(1280.0, 720.0),
            )),
            ..Default::default()
        };
        let mut remaining = egui::Rect::NOTHING;
        let output = ctx.run(input, |ctx| {
            Sidebar::new("Test", SECTIONS)
                .variables(&[("h", "Planck constant")])
                .active(0)
                .show(ctx);
            remaining = ctx.available_rect();
        });

        assert!(!output.shapes.is_empty());
        assert!(remaining.max.x <= 1280.0 - 280.0 + 1.0, "{remaining:?}");
    }
}
