use std::fs;
use std::path::{Path, PathBuf};
use std::str::SplitAsciiWhitespace;

use log::info;
use nalgebra::Point3;
use thiserror::Error;

use crate::model::orrery::{BodyInfo, Orrery, OrreryError};
use crate::model::satellite::SatelliteInfo;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("could not read {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("line {line}: missing field `{field}`")]
    MissingField { line: usize, field: &'static str },
    #[error("line {line}: field `{field}` is not a number: {value:?}")]
    BadNumber {
        line: usize,
        field: &'static str,
        value: String,
    },
    #[error("line {line}: {value:?} is not a six-digit hex color")]
    BadColor { line: usize, value: String },
    #[error(transparent)]
    Orrery(#[from] OrreryError),
}

/// Whitespace-separated fields on one line of a table.
struct Fields<'a> {
    line: usize,
    fields: SplitAsciiWhitespace<'a>,
}

impl<'a> Fields<'a> {
    fn new(line: usize, text: &'a str) -> Self {
        Fields {
            line,
            fields: text.split_ascii_whitespace(),
        }
    }

    fn string(&mut self, field: &'static str) -> Result<&'a str, CatalogError> {
        self.fields.next().ok_or(CatalogError::MissingField {
            line: self.line,
            field,
        })
    }

    /// A field that may be "-" to mean nothing.
    fn optional(&mut self, field: &'static str) -> Result<Option<&'a str>, CatalogError> {
        self.string(field).map(|s| if s == "-" { None } else { Some(s) })
    }

    fn f64(&mut self, field: &'static str) -> Result<f64, CatalogError> {
        let value = self.string(field)?;
        value.parse::<f64>().map_err(|_| CatalogError::BadNumber {
            line: self.line,
            field,
            value: value.to_owned(),
        })
    }
}

fn read(path: &Path) -> Result<String, CatalogError> {
    fs::read_to_string(path).map_err(|source| CatalogError::Io {
        path: path.to_owned(),
        source,
    })
}

/// Yields (line number, text) for every data line: skips the header, blank lines and comments.
fn data_lines(text: &str) -> impl Iterator<Item = (usize, &str)> {
    text.lines()
        .enumerate()
        .skip(1)
        .map(|(i, line)| (i + 1, line.trim()))
        .filter(|(_, line)| !line.is_empty() && !line.starts_with('#'))
}

/// Reads a body table. Columns:
/// `name radius orbit_radius angular_speed spin_rate texture ring_color`
pub fn read_catalog(path: impl AsRef<Path>) -> Result<Orrery, CatalogError> {
    let path = path.as_ref();
    let orrery = parse_catalog(&read(path)?)?;
    info!("Loaded {} bodies from {}", orrery.len(), path.display());
    Ok(orrery)
}

pub fn parse_catalog(text: &str) -> Result<Orrery, CatalogError> {
    let mut orrery = Orrery::new();

    for (line, text) in data_lines(text) {
        let mut fields = Fields::new(line, text);

        let name = fields.string("name")?;
        let radius = fields.f64("radius")? as f32;
        let orbit_radius = fields.f64("orbit_radius")?;
        let angular_speed = fields.f64("angular_speed")?;
        let spin_rate = fields.f64("spin_rate")?;
        let texture = fields.optional("texture")?.map(PathBuf::from);
        let ring_color = match fields.optional("ring_color")? {
            Some(s) => Some(parse_color(line, s)?),
            None => None,
        };

        let info = BodyInfo {
            texture,
            ring_color,
            ..BodyInfo::orbiting(name, radius, orbit_radius, angular_speed).with_spin_rate(spin_rate)
        };
        orrery.add_body(info)?;
    }

    Ok(orrery)
}

/// Reads a satellite table. Columns:
/// `name model angle_offset orbit_radius angular_speed extent`
pub fn read_satellites(path: impl AsRef<Path>) -> Result<Vec<SatelliteInfo>, CatalogError> {
    let path = path.as_ref();
    let satellites = parse_satellites(&read(path)?)?;
    info!(
        "Loaded {} satellites from {}",
        satellites.len(),
        path.display()
    );
    Ok(satellites)
}

pub fn parse_satellites(text: &str) -> Result<Vec<SatelliteInfo>, CatalogError> {
    data_lines(text)
        .map(|(line, text)| -> Result<SatelliteInfo, CatalogError> {
            let mut fields = Fields::new(line, text);
            Ok(SatelliteInfo {
                name: fields.string("name")?.to_owned(),
                model: PathBuf::from(fields.string("model")?),
                angle_offset: fields.f64("angle_offset")?,
                orbit_radius: fields.f64("orbit_radius")?,
                angular_speed: fields.f64("angular_speed")?,
                extent: fields.f64("extent")? as f32,
            })
        })
        .collect()
}

fn parse_color(line: usize, s: &str) -> Result<Point3<f32>, CatalogError> {
    let bad_color = || CatalogError::BadColor {
        line,
        value: s.to_owned(),
    };
    if s.len() != 6 || !s.is_ascii() {
        return Err(bad_color());
    }

    let channel = |range: std::ops::Range<usize>| {
        u8::from_str_radix(&s[range], 16)
            .map(|c| c as f32 / 255.0)
            .map_err(|_| bad_color())
    };
    Ok(Point3::new(channel(0..2)?, channel(2..4)?, channel(4..6)?))
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    const CATALOG: &str = "name radius orbit_radius angular_speed spin_rate texture ring_color
sun 20 0 0 0.005 sun_hd.jpg -

# inner planets
mercury 4 50 0.01 0.005 mercury_hd.jpg aaaaaa
venus 4 60 0.008 0.005 - ffcc00
";

    #[test]
    fn test_parse_catalog() {
        let orrery = parse_catalog(CATALOG).unwrap();
        assert_eq!(orrery.names(), &["sun", "mercury", "venus"]);

        let sun = orrery.get_body("sun").unwrap();
        assert_eq!(sun.info.radius, 20.0);
        assert_eq!(sun.info.ring_color, None);
        assert_eq!(sun.info.texture, Some(PathBuf::from("sun_hd.jpg")));

        let mercury = orrery.get_body("mercury").unwrap();
        assert_eq!(mercury.info.orbit_radius, 50.0);
        assert_eq!(mercury.info.angular_speed, 0.01);
        assert_eq!(mercury.info.spin_rate, 0.005);
        assert_relative_eq!(
            mercury.info.ring_color.unwrap(),
            Point3::new(170.0 / 255.0, 170.0 / 255.0, 170.0 / 255.0)
        );

        let venus = orrery.get_body("venus").unwrap();
        assert_eq!(venus.info.texture, None);
        assert_relative_eq!(venus.info.ring_color.unwrap(), Point3::new(1.0, 0.8, 0.0));
    }

    #[test]
    fn test_catalog_errors() {
        let header = "name radius orbit_radius angular_speed spin_rate texture ring_color\n";

        let missing = format!("{}sun 20 0 0\n", header);
        assert!(matches!(
            parse_catalog(&missing),
            Err(CatalogError::MissingField {
                line: 2,
                field: "spin_rate"
            })
        ));

        let bad_number = format!("{}sun twenty 0 0 0 - -\n", header);
        assert!(matches!(
            parse_catalog(&bad_number),
            Err(CatalogError::BadNumber {
                line: 2,
                field: "radius",
                ..
            })
        ));

        let bad_color = format!("{}mars 4 80 0.004 0.005 - ff45\n", header);
        assert!(matches!(
            parse_catalog(&bad_color),
            Err(CatalogError::BadColor { line: 2, .. })
        ));

        let duplicate = format!("{}sun 20 0 0 0 - -\nsun 20 0 0 0 - -\n", header);
        assert!(matches!(
            parse_catalog(&duplicate),
            Err(CatalogError::Orrery(OrreryError::DuplicateBody(_)))
        ));
    }

    #[test]
    fn test_parse_satellites() {
        let text = "name model angle_offset orbit_radius angular_speed extent
iss iss.obj 1.047198 60 0.00012 12
hubble hubble.obj 0.523599 60 0.00012 8
";
        let satellites = parse_satellites(text).unwrap();
        assert_eq!(satellites.len(), 2);
        assert_eq!(satellites[0].name, "iss");
        assert_eq!(satellites[0].model, PathBuf::from("iss.obj"));
        assert_relative_eq!(satellites[1].angle_offset, std::f64::consts::FRAC_PI_6, epsilon = 1e-6);
        assert_eq!(satellites[1].extent, 8.0);
    }

    #[test]
    fn test_missing_file() {
        assert!(matches!(
            read_catalog("definitely/not/here.txt"),
            Err(CatalogError::Io { .. })
        ));
    }
}
