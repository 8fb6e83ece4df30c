use std::cmp::Ordering;
use std::env;
use std::process::Command;

// CPU features we want to detect
#[derive(PartialEq, Eq, Debug)]
struct CpuFeature {
    name: &'static str,
    cfg_flag: &'static str,
    detected: bool,
}

impl CpuFeature {
    // Define priority order between CPU Features (Lowest number == Highest Priority)
    fn priority(&self) -> usize {
        match self.name {
            "avx512f" => 0,
            "avx2" => 1,
            "sse4_1" => 2,
            "neon" => 3,
            "fma" => 4,
            _ => usize::MAX, // lowest priority by default
        }
    }

    fn sysctl_key(&self) -> &'static str {
        match self.name {
            "avx512f" => "hw.optional.avx512f",
            "avx2" => "hw.optional.avx2_0",
            "sse4_1" => "hw.optional.sse4_1",
            "fma" => "hw.optional.fma",
            _ => "hw.optional.neon",
        }
    }

    // Groups all CPU features that change which register widths are native
    fn features() -> Vec<CpuFeature> {
        vec![
            CpuFeature {
                name: "sse4_1",
                cfg_flag: "sse",
                detected: false,
            },
            CpuFeature {
                name: "avx512f",
                cfg_flag: "avx512",
                detected: false,
            },
            CpuFeature {
                name: "avx2",
                cfg_flag: "avx2",
                detected: false,
            },
            CpuFeature {
                name: "neon",
                cfg_flag: "neon",
                detected: false,
            },
            // not a width of its own; the AVX2 registers and kernels need it
            CpuFeature {
                name: "fma",
                cfg_flag: "fma",
                detected: false,
            },
        ]
    }
}

impl Ord for CpuFeature {
    fn cmp(&self, other: &Self) -> Ordering {
        self.priority().cmp(&other.priority())
    }
}

impl PartialOrd for CpuFeature {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

// Feature detection trait to make implementations more modular
trait CpuFeatureDetector {
    fn detect_features(&self, features: &mut [CpuFeature]);
    fn is_applicable(&self) -> bool;
}

// Linux CPU feature detector
struct LinuxDetector;
impl CpuFeatureDetector for LinuxDetector {
    fn detect_features(&self, features: &mut [CpuFeature]) {
        if let Ok(cpuinfo) = std::fs::read_to_string("/proc/cpuinfo") {
            let contents = cpuinfo.to_lowercase();
            // whole words, so "fma" does not match "fma4"
            let has = |flag: &str| contents.split_whitespace().any(|word| word == flag);
            for feature in features.iter_mut() {
                // aarch64 kernels report NEON as "asimd"
                feature.detected = match feature.name {
                    "neon" => has("neon") || has("asimd"),
                    name => has(name),
                };
            }
        }
    }

    fn is_applicable(&self) -> bool {
        cfg!(target_os = "linux")
    }
}

// macOS CPU feature detector
struct MacOSDetector;
impl CpuFeatureDetector for MacOSDetector {
    fn detect_features(&self, features: &mut [CpuFeature]) {
        let Ok(output) = Command::new("sysctl").args(["-a"]).output() else {
            return;
        };
        let contents = String::from_utf8_lossy(&output.stdout).to_lowercase();

        for feature in features.iter_mut() {
            feature.detected = contents.contains(&format!("{}: 1", feature.sysctl_key()));
        }
    }

    fn is_applicable(&self) -> bool {
        cfg!(target_os = "macos")
    }
}

// Factory that creates the appropriate detector for the current OS
struct PlatformDetector;
impl PlatformDetector {
    fn cpu_features_detectors() -> Vec<Box<dyn CpuFeatureDetector>> {
        vec![Box::new(LinuxDetector), Box::new(MacOSDetector)]
    }

    fn detect_cpu_features(features: &mut [CpuFeature]) {
        // Get detectors for all supported platforms
        let detectors = Self::cpu_features_detectors();

        // Find the applicable detector and use it
        for detector in detectors {
            if detector.is_applicable() {
                detector.detect_features(features);
                break;
            }
        }
    }

    fn forced_emulation() -> bool {
        let by_feature = env::var_os("CARGO_FEATURE_FORCE_EMULATION").is_some();
        let by_env = env::var("SIMDREG_FORCE_EMULATION")
            .map(|value| value == "1" || value.eq_ignore_ascii_case("true"))
            .unwrap_or(false);

        by_feature || by_env
    }

    fn apply(features: &mut [CpuFeature]) {
        // Sort features by priority (highest first)
        features.sort();

        let detected: Vec<&'static str> = features
            .iter()
            .filter(|cpu_feature| cpu_feature.detected)
            .map(|cpu_feature| cpu_feature.cfg_flag)
            .collect();

        // if no width feature is detected, everything runs on the portable backend
        if detected.iter().all(|flag| *flag == "fma") {
            println!("cargo:rustc-cfg=fallback");
        }

        for cfg_flag in &detected {
            println!("cargo:rustc-cfg={cfg_flag}");
        }

        // Register widths backed by hardware. 128 bits is always native.
        let has = |flag: &str| detected.contains(&flag);
        let forced = Self::forced_emulation();

        let native256 = !forced && (has("avx2") || has("avx512"));
        let native512 = !forced && has("avx512");

        if native256 {
            println!("cargo:rustc-cfg=native256");
        }
        if native512 {
            println!("cargo:rustc-cfg=native512");
        }

        println!(
            "applying: {:?} (native256={native256}, native512={native512}, forced_emulation={forced})",
            detected
        );

        println!("cargo::rustc-check-cfg=cfg(avx512)");
        println!("cargo::rustc-check-cfg=cfg(avx2)");
        println!("cargo::rustc-check-cfg=cfg(sse)");
        println!("cargo::rustc-check-cfg=cfg(neon)");
        println!("cargo::rustc-check-cfg=cfg(fma)");
        println!("cargo::rustc-check-cfg=cfg(fallback)");
        println!("cargo::rustc-check-cfg=cfg(native256)");
        println!("cargo::rustc-check-cfg=cfg(native512)");
    }
}

fn main() {
    println!("cargo:rerun-if-changed=build.rs");
    println!("cargo:rerun-if-env-changed=SIMDREG_FORCE_EMULATION");

    let mut features = CpuFeature::features();

    // Determine if we're cross-compiling
    let host = env::var("HOST").unwrap_or_default();
    let target = env::var("TARGET").unwrap_or_default();

    let is_native_build = host == target;

    // Only run CPU detection for native builds
    if is_native_build {
        PlatformDetector::detect_cpu_features(&mut features);
    }

    PlatformDetector::apply(&mut features);
}
