use std::fmt;
use std::str::FromStr;

use cgmath::{InnerSpace, Vector3};
use orbis_base::{Error, Result};
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProjectionKey {
    Front,
    Back,
    Left,
    Right,
    Top,
    Bottom,
    Axonometric,
}

impl ProjectionKey {
    pub const ALL: [Self; 7] = [
        Self::Front,
        Self::Back,
        Self::Left,
        Self::Right,
        Self::Top,
        Self::Bottom,
        Self::Axonometric,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Self::Front => "front",
            Self::Back => "back",
            Self::Left => "left",
            Self::Right => "right",
            Self::Top => "top",
            Self::Bottom => "bottom",
            Self::Axonometric => "axonometric",
        }
    }
}

impl fmt::Display for ProjectionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.name())
    }
}

impl FromStr for ProjectionKey {
    type Err = Error;

    fn from_str(text: &str) -> Result<Self> {
        let key = match text.trim().to_ascii_lowercase().as_str() {
            "front" => Self::Front,
            "back" => Self::Back,
            "left" => Self::Left,
            "right" => Self::Right,
            "top" => Self::Top,
            "bottom" => Self::Bottom,
            "axo" | "axonometric" => Self::Axonometric,
            _ => return Err(Error::UnknownProjection(text.to_string())),
        };
        Ok(key)
    }
}

/// Eye position relative to the target, named after the axes it lies on.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Orientation {
    Xpos,
    Ypos,
    Zpos,
    Xneg,
    Yneg,
    Zneg,
    XposYnegZpos,
}

impl Orientation {
    /// Unit vector from the eye towards the target.
    pub fn view_direction(self) -> Vector3<f64> {
        -self.eye_offset().normalize()
    }

    /// Screen-up vector for this orientation; Z is up except when looking along Z.
    pub fn up(self) -> Vector3<f64> {
        match self {
            Self::Zpos => Vector3::unit_y(),
            Self::Zneg => -Vector3::unit_y(),
            _ => Vector3::unit_z(),
        }
    }

    fn eye_offset(self) -> Vector3<f64> {
        match self {
            Self::Xpos => Vector3::unit_x(),
            Self::Ypos => Vector3::unit_y(),
            Self::Zpos => Vector3::unit_z(),
            Self::Xneg => -Vector3::unit_x(),
            Self::Yneg => -Vector3::unit_y(),
            Self::Zneg => -Vector3::unit_z(),
            Self::XposYnegZpos => Vector3::new(1.0, -1.0, 1.0),
        }
    }
}

#[derive(Clone, Copy, Debug, Default)]
pub struct ProjectionPresets;

impl ProjectionPresets {
    pub fn orientation(key: ProjectionKey) -> Orientation {
        match key {
            ProjectionKey::Front => Orientation::Yneg,
            ProjectionKey::Back => Orientation::Ypos,
            ProjectionKey::Left => Orientation::Xneg,
            ProjectionKey::Right => Orientation::Xpos,
            ProjectionKey::Top => Orientation::Zpos,
            ProjectionKey::Bottom => Orientation::Zneg,
            ProjectionKey::Axonometric => Orientation::XposYnegZpos,
        }
    }

    pub fn lookup(name: &str) -> Result<Orientation> {
        let key: ProjectionKey = name.parse()?;
        Ok(Self::orientation(key))
    }

    pub fn iter() -> impl Iterator<Item = (ProjectionKey, Orientation)> {
        ProjectionKey::ALL
            .into_iter()
            .map(|key| (key, Self::orientation(key)))
    }
}
