/// The three plugin slots a render job fills.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PluginKind {
    Fractal,
    DivergentColouring,
    NonDivergentColouring,
}

impl PluginKind {
    pub const ALL: &'static [Self] = &[
        Self::Fractal,
        Self::DivergentColouring,
        Self::NonDivergentColouring,
    ];

    #[must_use]
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::Fractal => "fractal",
            Self::DivergentColouring => "divergent colouring",
            Self::NonDivergentColouring => "non-divergent colouring",
        }
    }
}

impl std::fmt::Display for PluginKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str((*self).display_name())
    }
}
