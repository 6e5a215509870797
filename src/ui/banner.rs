// Mon Feb 16 2026 - Alex

use colored::*;

pub struct Banner {
    title: String,
    subtitle: Option<String>,
    version: Option<String>,
    style: BannerStyle,
    use_color: bool,
    width: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BannerStyle {
    Simple,
    Fancy,
}

impl Banner {
    pub fn new(title: &str) -> Self {
        Self {
            title: title.to_string(),
            subtitle: None,
            version: None,
            style: BannerStyle::Fancy,
            use_color: true,
            width: 60,
        }
    }

    pub fn with_subtitle(mut self, subtitle: &str) -> Self {
        self.subtitle = Some(subtitle.to_string());
        self
    }

    pub fn with_version(mut self, version: &str) -> Self {
        self.version = Some(version.to_string());
        self
    }

    pub fn with_style(mut self, style: BannerStyle) -> Self {
        self.style = style;
        self
    }

    pub fn with_color(mut self, use_color: bool) -> Self {
        self.use_color = use_color;
        self
    }

    pub fn render(&self) -> String {
        match self.style {
            BannerStyle::Simple => self.render_simple(),
            BannerStyle::Fancy => self.render_fancy(),
        }
    }

    pub fn print(&self) {
        println!("{}", self.render());
    }

    fn render_simple(&self) -> String {
        let mut lines = vec![format!("=== {} ===", self.title)];
        if let Some(subtitle) = &self.subtitle {
            lines.push(subtitle.clone());
        }
        if let Some(version) = &self.version {
            lines.push(format!("Version: {}", version));
        }
        lines.join("\n")
    }

    fn render_fancy(&self) -> String {
        const ART: [&str; 4] = [
            "  ___ _    ____   ___ ___ ___    ___ ___  _  __",
            " |_ _| |  |_  ) / __| _ \\ _ \\  / __|   \\| |/ /",
            "  | || |__ / / | (__|  _/  _/  \\__ \\ |) | ' <",
            " |___|____/___| \\___|_| |_|    |___/___/|_|\\_\\",
        ];

        let centered = |text: &str| format!("{:^width$}", text, width = self.width);
        let mut lines: Vec<String> = ART
            .iter()
            .map(|line| self.paint(line, |s| s.cyan().bold()))
            .collect();
        lines.push(String::new());
        lines.push(self.paint(&centered(&self.title), |s| s.white().bold()));
        if let Some(subtitle) = &self.subtitle {
            lines.push(self.paint(&centered(subtitle), |s| s.yellow()));
        }
        if let Some(version) = &self.version {
            lines.push(self.paint(&centered(&format!("v{}", version)), |s| s.dimmed()));
        }
        lines.push(self.paint(&"=".repeat(self.width), |s| s.cyan()));
        lines.join("\n")
    }

    fn paint(&self, text: &str, style: impl Fn(&str) -> ColoredString) -> String {
        if self.use_color {
            style(text).to_string()
        } else {
            text.to_string()
        }
    }

    pub fn print_default() {
        Banner::default().print();
    }
}

impl Default for Banner {
    fn default() -> Self {
        Self::new("IL2CPP SDK Dumper")
            .with_subtitle("Obfuscation-aware C# interop generator")
            .with_version(env!("CARGO_PKG_VERSION"))
            .with_style(BannerStyle::Fancy)
    }
}
