//! Closed option lists used by the candidate form and the listing filters.
//!
//! Serialized values are the exact strings residents see; filtering and
//! storage compare on them, so spelling matters.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;
use utoipa::ToSchema;

/// Raised when a raw form or query value is not part of a closed option list
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("'{value}' is not a valid {field}")]
pub struct ParseOptionError {
    pub field: &'static str,
    pub value: String,
}

macro_rules! option_enum {
    (
        $(#[$meta:meta])*
        $name:ident, $field:literal {
            $($variant:ident => $value:literal),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, ToSchema,
        )]
        pub enum $name {
            $(
                #[serde(rename = $value)]
                $variant,
            )+
        }

        impl $name {
            /// Every value in display order
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            pub fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => $value,)+
                }
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::ALL[0]
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $name {
            type Err = ParseOptionError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($value => Ok($name::$variant),)+
                    _ => Err(ParseOptionError {
                        field: $field,
                        value: s.to_string(),
                    }),
                }
            }
        }
    };
}

option_enum! {
    /// Housing sub-block of the candidate's residence
    Blok, "blok" {
        K => "K",
        L => "L",
        M => "M",
        N => "N",
        O => "O",
        P => "P",
    }
}

option_enum! {
    /// Position being contested
    Role, "role" {
        Rt => "RT",
        Rw => "RW",
    }
}

option_enum! {
    Gender, "gender" {
        LakiLaki => "Laki-laki",
        Perempuan => "Perempuan",
    }
}

option_enum! {
    MaritalStatus, "status perkawinan" {
        BelumKawin => "Belum Kawin",
        Kawin => "Kawin",
        JandaDuda => "Janda/Duda",
    }
}

option_enum! {
    /// Canonical four-value job status list
    JobStatus, "status pekerjaan" {
        Bekerja => "Bekerja",
        TidakBekerja => "Tidak Bekerja",
        PelajarMahasiswa => "Pelajar/Mahasiswa",
        BelumBekerja => "Belum Bekerja",
    }
}
