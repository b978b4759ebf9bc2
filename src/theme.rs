use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Theme {
    pub font_family: String,
    pub font_size: f32,
    pub palette: Vec<String>,
    pub primary_color: String,
    pub background: String,
    pub surface: String,
    pub text_color: String,
    pub muted_text_color: String,
    pub grid_color: String,
    pub axis_color: String,
    pub border_color: String,
}

impl Theme {
    pub fn zeno_default() -> Self {
        Self {
            font_family: "system-ui, -apple-system, sans-serif".to_string(),
            font_size: 14.0,
            palette: vec![
                "#2563EB".to_string(),
                "#0D9488".to_string(),
                "#8B5CF6".to_string(),
                "#F59E0B".to_string(),
                "#EF4444".to_string(),
                "#10B981".to_string(),
            ],
            primary_color: "#2563EB".to_string(),
            background: "#F9FAFB".to_string(),
            surface: "#FFFFFF".to_string(),
            text_color: "#111827".to_string(),
            muted_text_color: "#6B7280".to_string(),
            grid_color: "#E5E7EB".to_string(),
            axis_color: "#9CA3AF".to_string(),
            border_color: "#E5E7EB".to_string(),
        }
    }

    pub fn midnight() -> Self {
        Self {
            font_family: "Inter, Segoe UI, system-ui, sans-serif".to_string(),
            font_size: 14.0,
            palette: vec![
                "#60A5FA".to_string(),
                "#2DD4BF".to_string(),
                "#A78BFA".to_string(),
                "#FBBF24".to_string(),
                "#F87171".to_string(),
                "#34D399".to_string(),
            ],
            primary_color: "#60A5FA".to_string(),
            background: "#0F172A".to_string(),
            surface: "#1E293B".to_string(),
            text_color: "#F1F5F9".to_string(),
            muted_text_color: "#94A3B8".to_string(),
            grid_color: "#334155".to_string(),
            axis_color: "#64748B".to_string(),
            border_color: "#334155".to_string(),
        }
    }

    /// Positional series color, wrapping past the end of the palette.
    pub fn series_color(&self, index: usize) -> &str {
        if self.palette.is_empty() {
            return &self.primary_color;
        }
        &self.palette[index % self.palette.len()]
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::zeno_default()
    }
}
