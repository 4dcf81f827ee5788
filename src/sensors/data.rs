//! Scaled output samples

/// Magnetometer counts per microtesla
pub const MAG_LSB_PER_UT: f32 = 16.0;

/// Gyroscope counts per degree per second
pub const GYRO_LSB_PER_DPS: f32 = 16.0;

/// Euler angle counts per degree
pub const EULER_LSB_PER_DEGREE: f32 = 16.0;

/// Quaternion counts per unit (2^14)
pub const QUATERNION_LSB: f32 = 16384.0;

macro_rules! vector3 {
    ($(#[$meta:meta])* $name:ident, $unit:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Default)]
        #[cfg_attr(feature = "defmt", derive(defmt::Format))]
        pub struct $name {
            #[doc = concat!("X axis (", $unit, ")")]
            pub x: f32,
            #[doc = concat!("Y axis (", $unit, ")")]
            pub y: f32,
            #[doc = concat!("Z axis (", $unit, ")")]
            pub z: f32,
        }

        impl $name {
            /// Euclidean norm of the vector
            #[must_use]
            pub fn magnitude(&self) -> f32 {
                libm::sqrtf(self.x * self.x + self.y * self.y + self.z * self.z)
            }

            pub(crate) fn scaled(raw: [i16; 3], divisor: f32) -> Self {
                Self {
                    x: f32::from(raw[0]) / divisor,
                    y: f32::from(raw[1]) / divisor,
                    z: f32::from(raw[2]) / divisor,
                }
            }
        }
    };
}

vector3!(
    /// Accelerometer output, unscaled register counts
    Acceleration,
    "LSB"
);
vector3!(
    /// Magnetic field
    MagneticField,
    "uT"
);
vector3!(
    /// Angular rate
    AngularRate,
    "deg/s"
);
vector3!(
    /// Gravity vector, in the unit selected by `UNIT_SEL` bit 0
    Gravity,
    "m/s^2 or mg"
);
vector3!(
    /// Linear acceleration with gravity removed, in the unit selected by `UNIT_SEL` bit 0
    LinearAcceleration,
    "m/s^2 or mg"
);

impl Acceleration {
    pub(crate) fn from_raw(raw: [i16; 3]) -> Self {
        Self::scaled(raw, 1.0)
    }
}

impl MagneticField {
    pub(crate) fn from_raw(raw: [i16; 3]) -> Self {
        Self::scaled(raw, MAG_LSB_PER_UT)
    }
}

impl AngularRate {
    pub(crate) fn from_raw(raw: [i16; 3]) -> Self {
        Self::scaled(raw, GYRO_LSB_PER_DPS)
    }
}

impl Gravity {
    pub(crate) fn from_raw(raw: [i16; 3], divisor: f32) -> Self {
        Self::scaled(raw, divisor)
    }
}

impl LinearAcceleration {
    pub(crate) fn from_raw(raw: [i16; 3], divisor: f32) -> Self {
        Self::scaled(raw, divisor)
    }
}

/// Fused orientation as Euler angles (degrees)
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct EulerAngles {
    /// Heading (yaw)
    pub heading: f32,
    /// Roll
    pub roll: f32,
    /// Pitch
    pub pitch: f32,
}

impl EulerAngles {
    pub(crate) fn from_raw(raw: [i16; 3]) -> Self {
        Self {
            heading: f32::from(raw[0]) / EULER_LSB_PER_DEGREE,
            roll: f32::from(raw[1]) / EULER_LSB_PER_DEGREE,
            pitch: f32::from(raw[2]) / EULER_LSB_PER_DEGREE,
        }
    }
}

/// Fused orientation as a unit quaternion
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Quaternion {
    /// Scalar part
    pub w: f32,
    /// X component
    pub x: f32,
    /// Y component
    pub y: f32,
    /// Z component
    pub z: f32,
}

impl Quaternion {
    pub(crate) fn from_raw(raw: [i16; 4]) -> Self {
        Self {
            w: f32::from(raw[0]) / QUATERNION_LSB,
            x: f32::from(raw[1]) / QUATERNION_LSB,
            y: f32::from(raw[2]) / QUATERNION_LSB,
            z: f32::from(raw[3]) / QUATERNION_LSB,
        }
    }

    /// Quaternion norm, close to 1.0 once fusion has converged
    #[must_use]
    pub fn norm(&self) -> f32 {
        libm::sqrtf(self.w * self.w + self.x * self.x + self.y * self.y + self.z * self.z)
    }
}
