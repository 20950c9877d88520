use std::io::{self, Write};

use crate::vehicle::Profile;

/// Write the side outline in CSV form.
///
/// Columns: section, x, y. `section` is `body` or `fin`; `y` is the radial
/// offset of the upper half.
pub fn write_profile<W: Write>(writer: &mut W, profile: &Profile) -> io::Result<()> {
    writeln!(writer, "section,x,y")?;

    for p in &profile.body {
        writeln!(writer, "body,{:.6},{:.6}", p.x, p.y)?;
    }
    for p in &profile.fin {
        writeln!(writer, "fin,{:.6},{:.6}", p.x, p.y)?;
    }

    Ok(())
}

/// Write the side outline to a CSV file at the given path.
pub fn write_profile_file(path: &str, profile: &Profile) -> io::Result<()> {
    let mut file = std::fs::File::create(path)?;
    write_profile(&mut file, profile)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vehicle::{presets, side_profile};

    #[test]
    fn csv_output_has_header_and_rows() {
        let g = presets::mini_magg().geometry;
        let profile = side_profile(&g, 4);

        let mut buf = Vec::new();
        write_profile(&mut buf, &profile).unwrap();
        let output = String::from_utf8(buf).unwrap();
        let lines: Vec<&str> = output.lines().collect();

        assert_eq!(lines[0], "section,x,y");
        assert_eq!(lines.len(), 1 + profile.body.len() + profile.fin.len());
        assert!(lines[1].starts_with("body,0.000000,"));
        assert!(lines.last().unwrap().starts_with("fin,27.000000,"));
    }
}
