//! Static layout and configuration objects passed to the plotting library.

use serde::Serialize;

/// Axis colors derived from the page's text color custom property at startup.
#[derive(Debug, Clone, PartialEq)]
pub struct ThemeColors {
    pub text: String,
    pub grid: String,
}

impl ThemeColors {
    pub fn from_css(text: &str) -> Self {
        let text = text.trim().to_string();
        Self {
            grid: translucent(&text, 0.3),
            text,
        }
    }
}

/// Turns `hsl(..)` / `rgb(..)` into the alpha form with the given opacity.
/// Other color syntaxes are returned unchanged.
pub fn translucent(color: &str, alpha: f64) -> String {
    for (plain, with_alpha) in [("hsl(", "hsla("), ("rgb(", "rgba(")] {
        if let Some(inner) = color
            .strip_prefix(plain)
            .and_then(|rest| rest.strip_suffix(')'))
        {
            return format!("{with_alpha}{inner}, {alpha})");
        }
    }
    color.to_string()
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Axis {
    pub title: String,
    pub fixedrange: bool,
    pub gridcolor: String,
    pub color: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Legend {
    pub x: f64,
    pub y: f64,
    pub xanchor: String,
    pub yanchor: String,
    pub traceorder: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Margin {
    pub l: u32,
    pub r: u32,
    pub t: u32,
    pub b: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlotLayout {
    pub xaxis: Axis,
    pub yaxis: Axis,
    pub legend: Legend,
    pub margin: Margin,
    pub paper_bgcolor: String,
    pub plot_bgcolor: String,
    pub autosize: bool,
}

impl PlotLayout {
    pub fn themed(colors: &ThemeColors) -> Self {
        let axis = |title: &str| Axis {
            title: title.to_string(),
            fixedrange: true,
            gridcolor: colors.grid.clone(),
            color: colors.text.clone(),
        };
        Self {
            xaxis: axis("time"),
            yaxis: axis("energy"),
            legend: Legend {
                x: 0.98,
                y: 0.98,
                xanchor: "right".to_string(),
                yanchor: "top".to_string(),
                traceorder: "reversed".to_string(),
            },
            margin: Margin {
                l: 60,
                r: 30,
                t: 30,
                b: 50,
            },
            paper_bgcolor: TRANSPARENT.to_string(),
            plot_bgcolor: TRANSPARENT.to_string(),
            autosize: true,
        }
    }
}

const TRANSPARENT: &str = "rgba(0,0,0,0)";

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlotConfig {
    pub display_mode_bar: bool,
    pub responsive: bool,
}

impl Default for PlotConfig {
    fn default() -> Self {
        Self {
            display_mode_bar: false,
            responsive: true,
        }
    }
}
