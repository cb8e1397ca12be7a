/// Viewport dimensions for the schema layout.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

/// Parse a `WIDTHxHEIGHT` viewport such as `1920x1080`.
///
/// Both dimensions must be positive numbers.
pub fn parse_viewport(s: &str) -> Result<Viewport, String> {
    let Some((w, h)) = s.split_once(['x', 'X']) else {
        return Err(format!("Viewport must be WIDTHxHEIGHT: '{s}'"));
    };
    let parse = |part: &str, name: &str| -> Result<f64, String> {
        let value: f64 = part
            .trim()
            .parse()
            .map_err(|_| format!("Invalid viewport {name}: '{part}'"))?;
        if !value.is_finite() || value <= 0.0 {
            return Err(format!("Viewport {name} must be positive: '{part}'"));
        }
        Ok(value)
    };
    Ok(Viewport {
        width: parse(w, "width")?,
        height: parse(h, "height")?,
    })
}
