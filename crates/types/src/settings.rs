//! Per-stream formatting parameters.
//!
//! Every stream (body or endnotes) carries its own `FormatSettings`. Values are
//! stored as the signed integers the markup supplies and only change through
//! the validated setters below, so a rejected value never takes effect.

use crate::error::ConfigError;

/// Built-in parameter values for the body and endnote streams.
pub mod defaults {
    pub const TEXT_WIDTH: i32 = 72;
    /// Effectively unlimited: a body page never fills unless `textheight` is set.
    pub const TEXT_HEIGHT: i32 = i32::MAX;
    pub const INDENTATION: i32 = 0;
    pub const PARAGRAPH_INDENTATION: i32 = 3;
    pub const PARAGRAPH_SKIP: i32 = 0;

    pub const ENDNOTE_TEXT_WIDTH: i32 = 72;
    pub const ENDNOTE_INDENTATION: i32 = 4;
    /// Hanging indentation: the `[n]` marker starts flush with the margin.
    pub const ENDNOTE_PARAGRAPH_INDENTATION: i32 = -4;
    pub const ENDNOTE_PARAGRAPH_SKIP: i32 = 1;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormatSettings {
    text_width: i32,
    text_height: i32,
    indentation: i32,
    paragraph_indentation: i32,
    paragraph_skip: i32,
    fill: bool,
    justify: bool,
}

impl Default for FormatSettings {
    fn default() -> Self {
        Self {
            text_width: defaults::TEXT_WIDTH,
            text_height: defaults::TEXT_HEIGHT,
            indentation: defaults::INDENTATION,
            paragraph_indentation: defaults::PARAGRAPH_INDENTATION,
            paragraph_skip: defaults::PARAGRAPH_SKIP,
            fill: true,
            justify: true,
        }
    }
}

impl FormatSettings {
    /// Settings for the main body of a document.
    pub fn new() -> Self {
        Self::default()
    }

    /// Settings for the endnote stream: hanging indentation and one blank
    /// line between notes.
    pub fn endnote() -> Self {
        Self {
            text_width: defaults::ENDNOTE_TEXT_WIDTH,
            indentation: defaults::ENDNOTE_INDENTATION,
            paragraph_indentation: defaults::ENDNOTE_PARAGRAPH_INDENTATION,
            paragraph_skip: defaults::ENDNOTE_PARAGRAPH_SKIP,
            ..Self::default()
        }
    }

    pub fn text_width(&self) -> i32 {
        self.text_width
    }

    pub fn text_height(&self) -> i32 {
        self.text_height
    }

    pub fn indentation(&self) -> i32 {
        self.indentation
    }

    pub fn paragraph_indentation(&self) -> i32 {
        self.paragraph_indentation
    }

    pub fn paragraph_skip(&self) -> i32 {
        self.paragraph_skip
    }

    pub fn fill(&self) -> bool {
        self.fill
    }

    /// True only while both justification and filling are on.
    pub fn justify(&self) -> bool {
        self.fill && self.justify
    }

    pub fn set_text_width(&mut self, val: i32) -> Result<(), ConfigError> {
        self.text_width = non_negative("textwidth", val)?;
        Ok(())
    }

    pub fn set_text_height(&mut self, val: i32) -> Result<(), ConfigError> {
        if val <= 0 {
            return Err(ConfigError::NonPositiveHeight(val));
        }
        self.text_height = val;
        Ok(())
    }

    pub fn set_indentation(&mut self, val: i32) -> Result<(), ConfigError> {
        self.indentation = non_negative("indent", val)?;
        Ok(())
    }

    pub fn set_paragraph_indentation(&mut self, val: i32) -> Result<(), ConfigError> {
        self.paragraph_indentation = non_negative("parindent", val)?;
        Ok(())
    }

    pub fn set_paragraph_skip(&mut self, val: i32) -> Result<(), ConfigError> {
        self.paragraph_skip = non_negative("parskip", val)?;
        Ok(())
    }

    /// Turning fill off also turns justification off. Turning it back on
    /// leaves justification off.
    pub fn set_fill(&mut self, on: bool) {
        self.fill = on;
        if !on {
            self.justify = false;
        }
    }

    /// Ignored while fill mode is off.
    pub fn set_justify(&mut self, on: bool) {
        if self.fill {
            self.justify = on;
        }
    }
}

fn non_negative(option: &'static str, value: i32) -> Result<i32, ConfigError> {
    if value < 0 {
        Err(ConfigError::NegativeValue { option, value })
    } else {
        Ok(value)
    }
}
