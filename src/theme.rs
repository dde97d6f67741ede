use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
#[error("Unknown theme: {0}")]
pub struct UnknownTheme(pub String);

/// Colors and shapes for a rendered diagram.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Theme {
    pub name: &'static str,
    /// Node border color.
    pub color: &'static str,
    /// Node fill when columns are hidden.
    pub fillcolor: &'static str,
    /// Node fill when columns are shown.
    pub fillcolor_expanded: &'static str,
    /// Header cell background.
    pub bgcolor: &'static str,
    /// Column text color.
    pub icolor: &'static str,
    /// Header text color.
    pub tcolor: &'static str,
    pub style: &'static str,
    pub shape: &'static str,
    pub pencolor: &'static str,
    pub penwidth: &'static str,
}

const PRESETS: [Theme; 3] = [
    Theme {
        name: "Common Gray",
        color: "#6c6c6c",
        fillcolor: "#e0e0e0",
        fillcolor_expanded: "#f5f5f5",
        bgcolor: "#e0e0e0",
        icolor: "#000000",
        tcolor: "#000000",
        style: "rounded",
        shape: "Mrecord",
        pencolor: "#696969",
        penwidth: "1",
    },
    Theme {
        name: "Blue Navy",
        color: "#1a5282",
        fillcolor: "#1a5282",
        fillcolor_expanded: "#ffffff",
        bgcolor: "#1a5282",
        icolor: "#000000",
        tcolor: "#ffffff",
        style: "rounded",
        shape: "Mrecord",
        pencolor: "#0078d7",
        penwidth: "2",
    },
    Theme {
        name: "Common Gray Box",
        color: "#6c6c6c",
        fillcolor: "#e0e0e0",
        fillcolor_expanded: "#f5f5f5",
        bgcolor: "#e0e0e0",
        icolor: "#000000",
        tcolor: "#000000",
        style: "rounded",
        shape: "record",
        pencolor: "#696969",
        penwidth: "1",
    },
];

impl Default for Theme {
    fn default() -> Self {
        PRESETS[0]
    }
}

impl Theme {
    pub fn from_name(name: &str) -> Result<Self, UnknownTheme> {
        PRESETS
            .iter()
            .find(|t| t.name == name)
            .copied()
            .ok_or_else(|| UnknownTheme(name.to_string()))
    }

    /// Preset names in catalog order.
    pub fn names() -> impl Iterator<Item = &'static str> {
        PRESETS.iter().map(|t| t.name)
    }

    pub fn fill(&self, show_columns: bool) -> &'static str {
        if show_columns { self.fillcolor_expanded } else { self.fillcolor }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_name() {
        let theme = Theme::from_name("Blue Navy").unwrap();
        assert_eq!(theme.pencolor, "#0078d7");
        assert_eq!(theme.penwidth, "2");
        assert_eq!(Theme::from_name("Common Gray Box").unwrap().shape, "record");
    }

    #[test]
    fn test_unknown_theme() {
        assert_eq!(
            Theme::from_name("Neon"),
            Err(UnknownTheme("Neon".to_string()))
        );
    }

    #[test]
    fn test_names_and_default() {
        let names: Vec<&str> = Theme::names().collect();
        assert_eq!(names, vec!["Common Gray", "Blue Navy", "Common Gray Box"]);
        assert_eq!(Theme::default().name, "Common Gray");
    }

    #[test]
    fn test_fill() {
        let theme = Theme::default();
        assert_eq!(theme.fill(false), "#e0e0e0");
        assert_eq!(theme.fill(true), "#f5f5f5");
    }
}
