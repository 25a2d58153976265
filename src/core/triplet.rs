//! Target triplet construction
//!
//! Cross-toolchain recipes expose compiler drivers and a CHOST value named
//! after the target triplet. The two spellings differ: the CHOST (llvm)
//! spelling uses the plain architecture name, while compiler driver
//! binaries use the finer-grained variant plus the platform API level.

use crate::core::settings::{BuildSettings, TargetArch, TargetOs};

/// CHOST-style triplet for the given settings
pub fn chost(settings: &BuildSettings) -> String {
    match settings.os {
        TargetOs::Android => {
            let arch = match settings.arch {
                TargetArch::Armv7 => "arm",
                TargetArch::Armv8 => "aarch64",
                TargetArch::X86 => "i686",
                TargetArch::X86_64 => "x86_64",
            };
            format!("{arch}-linux-{}", android_abi(settings.arch))
        }
        TargetOs::Linux => {
            let arch = match settings.arch {
                TargetArch::Armv7 => "arm",
                TargetArch::Armv8 => "aarch64",
                TargetArch::X86 => "i686",
                TargetArch::X86_64 => "x86_64",
            };
            format!("{arch}-linux-gnu")
        }
        TargetOs::Macos => {
            let arch = match settings.arch {
                TargetArch::Armv8 => "aarch64",
                _ => "x86_64",
            };
            format!("{arch}-apple-darwin")
        }
        TargetOs::Windows => {
            let arch = match settings.arch {
                TargetArch::X86 => "i686",
                _ => "x86_64",
            };
            format!("{arch}-pc-windows-msvc")
        }
    }
}

/// Compiler-driver triplet: the finer-grained architecture variant, with
/// the API level appended for Android targets.
pub fn driver(settings: &BuildSettings, api_level: u32) -> String {
    match settings.os {
        TargetOs::Android => {
            let arch = match settings.arch {
                TargetArch::Armv7 => "armv7a",
                TargetArch::Armv8 => "aarch64",
                TargetArch::X86 => "i686",
                TargetArch::X86_64 => "x86_64",
            };
            format!("{arch}-linux-{}{api_level}", android_abi(settings.arch))
        }
        _ => chost(settings),
    }
}

/// ABI component of an Android triplet
fn android_abi(arch: TargetArch) -> &'static str {
    match arch {
        TargetArch::Armv7 => "androideabi",
        _ => "android",
    }
}

/// Host tag used in prebuilt toolchain directory layouts
/// (`toolchains/llvm/prebuilt/<host_tag>`).
pub fn host_tag(host: &BuildSettings) -> String {
    format!("{}-{}", host.os.as_str(), host.arch.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::settings::BuildType;

    fn android(arch: TargetArch) -> BuildSettings {
        BuildSettings {
            os: TargetOs::Android,
            arch,
            build_type: BuildType::Release,
        }
    }

    #[test]
    fn test_android_chost_triplets() {
        assert_eq!(chost(&android(TargetArch::Armv7)), "arm-linux-androideabi");
        assert_eq!(chost(&android(TargetArch::Armv8)), "aarch64-linux-android");
        assert_eq!(chost(&android(TargetArch::X86)), "i686-linux-android");
        assert_eq!(chost(&android(TargetArch::X86_64)), "x86_64-linux-android");
    }

    #[test]
    fn test_android_driver_uses_finer_arch_and_api() {
        assert_eq!(
            driver(&android(TargetArch::Armv7), 21),
            "armv7a-linux-androideabi21"
        );
        assert_eq!(
            driver(&android(TargetArch::Armv8), 23),
            "aarch64-linux-android23"
        );
    }

    #[test]
    fn test_non_android_driver_equals_chost() {
        let settings = BuildSettings {
            os: TargetOs::Linux,
            arch: TargetArch::X86_64,
            build_type: BuildType::Release,
        };
        assert_eq!(driver(&settings, 21), chost(&settings));
        assert_eq!(chost(&settings), "x86_64-linux-gnu");
    }

    #[test]
    fn test_apple_and_windows_triplets() {
        let macos = BuildSettings {
            os: TargetOs::Macos,
            arch: TargetArch::Armv8,
            build_type: BuildType::Release,
        };
        assert_eq!(chost(&macos), "aarch64-apple-darwin");

        let windows = BuildSettings {
            os: TargetOs::Windows,
            arch: TargetArch::X86_64,
            build_type: BuildType::Release,
        };
        assert_eq!(chost(&windows), "x86_64-pc-windows-msvc");
    }

    #[test]
    fn test_host_tag_layout() {
        let host = BuildSettings {
            os: TargetOs::Linux,
            arch: TargetArch::X86_64,
            build_type: BuildType::Release,
        };
        assert_eq!(host_tag(&host), "linux-x86_64");
    }
}
