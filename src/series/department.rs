//! Plant departments and their equipment drill-down catalogue.

use std::fmt;

use serde::Deserialize;

/// Normal-distribution parameters for one load series.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LoadParams {
    /// Mean load in kilowatts.
    pub mean_kw: f32,
    /// Standard deviation in kilowatts.
    pub std_kw: f32,
}

/// One equipment unit inside a department.
///
/// The drill-down view splits a department's distribution across its units
/// by `share`; shares within a department sum to 1.0.
#[derive(Debug, Clone, Copy)]
pub struct EquipmentUnit {
    /// Display name of the unit.
    pub name: &'static str,
    /// Fraction of the department load attributed to this unit.
    pub share: f32,
}

impl EquipmentUnit {
    /// Distribution parameters for this unit given its department's params.
    pub fn load_params(&self, department: LoadParams) -> LoadParams {
        LoadParams {
            mean_kw: department.mean_kw * self.share,
            std_kw: department.std_kw * self.share,
        }
    }
}

/// The four profiled plant departments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Department {
    /// Sinter plant.
    Sintering,
    /// Pellet plant.
    Pelletizing,
    /// Direct reduced iron plant.
    Dri,
    /// Blast furnace.
    BlastFurnace,
}

impl Department {
    /// All departments in canonical chart order.
    pub const ALL: [Department; 4] = [
        Department::Sintering,
        Department::Pelletizing,
        Department::Dri,
        Department::BlastFurnace,
    ];

    /// Display and config name.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Sintering => "Sintering",
            Self::Pelletizing => "Pelletizing",
            Self::Dri => "DRI",
            Self::BlastFurnace => "BF",
        }
    }

    /// Parses a display/config name.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "Sintering" => Some(Self::Sintering),
            "Pelletizing" => Some(Self::Pelletizing),
            "DRI" => Some(Self::Dri),
            "BF" => Some(Self::BlastFurnace),
            _ => None,
        }
    }

    /// Per-department offset added to the master seed so department series
    /// stay decorrelated while remaining reproducible from one seed.
    pub fn seed_offset(self) -> u64 {
        match self {
            Self::Sintering => 0,
            Self::Pelletizing => 11,
            Self::Dri => 23,
            Self::BlastFurnace => 37,
        }
    }

    /// Default distribution parameters (kW) for this department's load.
    pub fn default_load(self) -> LoadParams {
        match self {
            Self::Sintering => LoadParams {
                mean_kw: 180.0,
                std_kw: 20.0,
            },
            Self::Pelletizing => LoadParams {
                mean_kw: 150.0,
                std_kw: 15.0,
            },
            Self::Dri => LoadParams {
                mean_kw: 200.0,
                std_kw: 25.0,
            },
            Self::BlastFurnace => LoadParams {
                mean_kw: 220.0,
                std_kw: 30.0,
            },
        }
    }

    /// Equipment units for the drill-down view.
    pub fn equipment(self) -> &'static [EquipmentUnit] {
        match self {
            Self::Sintering => &[
                EquipmentUnit {
                    name: "Sinter Fan",
                    share: 0.45,
                },
                EquipmentUnit {
                    name: "Ignition Furnace",
                    share: 0.35,
                },
                EquipmentUnit {
                    name: "Raw Mix Conveyor",
                    share: 0.20,
                },
            ],
            Self::Pelletizing => &[
                EquipmentUnit {
                    name: "Induration Furnace",
                    share: 0.50,
                },
                EquipmentUnit {
                    name: "Balling Disc",
                    share: 0.30,
                },
                EquipmentUnit {
                    name: "Grate Drive",
                    share: 0.20,
                },
            ],
            Self::Dri => &[
                EquipmentUnit {
                    name: "Rotary Kiln",
                    share: 0.55,
                },
                EquipmentUnit {
                    name: "Cooler Fan",
                    share: 0.25,
                },
                EquipmentUnit {
                    name: "Material Handling",
                    share: 0.20,
                },
            ],
            Self::BlastFurnace => &[
                EquipmentUnit {
                    name: "Turbo Blower",
                    share: 0.50,
                },
                EquipmentUnit {
                    name: "Hot Blast Stove",
                    share: 0.30,
                },
                EquipmentUnit {
                    name: "Charging System",
                    share: 0.20,
                },
            ],
        }
    }
}

impl fmt::Display for Department {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
