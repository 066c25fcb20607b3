//! Device identity tests
//!
//! Construction rules, the string grammar, backend resolution and index
//! rebinding for `Device`.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use std::collections::HashMap;
use tessera_device::{Backend, Device, DeviceError, DeviceKind};

fn cuda(index: i32) -> Device {
    Device::cuda(index).expect("valid CUDA index")
}

/// Test the acceptance rule for every kind on a band of indices
#[test]
fn test_construct_acceptance_rule() {
    for kind in DeviceKind::ALL {
        for index in -4..=4 {
            let expected = index >= -1 && (kind != DeviceKind::Cpu || index <= 0);
            assert_eq!(
                Device::new(kind, index).is_ok(),
                expected,
                "construct({kind}, {index})"
            );
        }
    }
}

/// Test which error each rejected index produces
#[test]
fn test_construct_error_kinds() {
    assert_eq!(
        Device::new(DeviceKind::Cuda, -2),
        Err(DeviceError::InvalidIndex { index: -2 })
    );
    assert_eq!(
        Device::new(DeviceKind::Cpu, -7),
        Err(DeviceError::InvalidIndex { index: -7 })
    );
    assert_eq!(
        Device::new(DeviceKind::Cpu, 1),
        Err(DeviceError::InvalidCpuIndex { index: 1 })
    );
    assert_eq!(
        Device::new(DeviceKind::Cpu, 42),
        Err(DeviceError::InvalidCpuIndex { index: 42 })
    );
}

/// Test construction through a backend
#[test]
fn test_construct_from_backend() {
    let device = Device::from_backend(Backend::SparseCuda, 2).unwrap();
    assert_eq!(device, cuda(2));

    assert_eq!(
        Device::from_backend(Backend::SparseCpu, -1).unwrap(),
        Device::cpu()
    );
    assert_eq!(
        Device::from_backend(Backend::Undefined, 0),
        Err(DeviceError::UnsupportedBackend {
            backend: "Undefined".to_string()
        })
    );
    // The kind is resolved first, then the usual index rules apply.
    assert_eq!(
        Device::from_backend(Backend::Cpu, 1),
        Err(DeviceError::InvalidCpuIndex { index: 1 })
    );
}

/// Test the literal parse cases
#[test]
fn test_parse_cases() {
    assert_eq!(Device::parse("cuda:7").unwrap(), cuda(7));
    assert_eq!(Device::parse("cpu").unwrap(), Device::cpu());
    assert_eq!(
        Device::parse("cpu:0").unwrap(),
        Device::new(DeviceKind::Cpu, 0).unwrap()
    );
    assert_eq!(
        Device::parse("cuda").unwrap(),
        Device::with_kind(DeviceKind::Cuda)
    );

    assert_eq!(
        Device::parse("cpu:1"),
        Err(DeviceError::InvalidCpuIndex { index: 1 })
    );

    let malformed = [
        "cpu:", "gpu:0", "cuda:-1", "cuda:+1", "CUDA:0", "3", ":3", "", "cuda:0x1", "cuda:1a",
    ];
    for input in malformed {
        let err = Device::parse(input).unwrap_err();
        match err {
            DeviceError::Parse { input: carried, .. } => assert_eq!(carried, input),
            other => panic!("{input:?} produced {other:?}"),
        }
    }
}

/// Test FromStr and TryFrom agree with parse
#[test]
fn test_explicit_conversions() {
    let parsed: Device = "cuda:5".parse().unwrap();
    let converted = Device::try_from("cuda:5").unwrap();
    assert_eq!(parsed, converted);
    assert!(Device::try_from("tpu").is_err());
}

/// Test canonical rendering
#[test]
fn test_describe() {
    assert_eq!(Device::cpu().to_string(), "cpu");
    assert_eq!(Device::new(DeviceKind::Cpu, 0).unwrap().to_string(), "cpu:0");
    assert_eq!(Device::with_kind(DeviceKind::Cuda).to_string(), "cuda");
    assert_eq!(cuda(3).to_string(), "cuda:3");
    assert_eq!(DeviceKind::Cuda.to_string(), "cuda");
}

/// Test equality is structural with no normalization
#[test]
fn test_equality_is_structural() {
    let unspecified = Device::cpu();
    let explicit = Device::new(DeviceKind::Cpu, 0).unwrap();
    assert_ne!(unspecified, explicit);
    assert_eq!(unspecified, Device::with_kind(DeviceKind::Cpu));
    assert_ne!(cuda(0), Device::new(DeviceKind::Cpu, 0).unwrap());
    assert_eq!(cuda(1), cuda(1));
}

/// Test devices work as dispatch keys
#[test]
fn test_device_as_map_key() {
    let mut kernels = HashMap::new();
    kernels.insert(Device::cpu(), "host");
    kernels.insert(cuda(0), "gpu0");
    kernels.insert(cuda(1), "gpu1");

    assert_eq!(kernels.get(&Device::parse("cuda:1").unwrap()), Some(&"gpu1"));
    assert_eq!(kernels.get(&Device::parse("cpu").unwrap()), Some(&"host"));
    assert_eq!(kernels.get(&Device::parse("cpu:0").unwrap()), None);
}

/// Test index rebinding on CUDA devices always succeeds for valid indices
#[test]
fn test_set_index_cuda() {
    let mut device = cuda(0);
    for index in [-1, 0, 1, 17, i32::MAX] {
        device.set_index(index).unwrap();
        assert_eq!(device.index(), index);
        assert_eq!(device.kind(), DeviceKind::Cuda);
    }
    assert_eq!(
        device.set_index(-2),
        Err(DeviceError::InvalidIndex { index: -2 })
    );
    assert_eq!(device.index(), i32::MAX);
}

/// Test index rebinding re-checks the CPU rule
#[test]
fn test_set_index_cpu_rechecks_kind() {
    let mut device = Device::cpu();
    device.set_index(0).unwrap();
    assert_eq!(device, Device::new(DeviceKind::Cpu, 0).unwrap());

    assert_eq!(
        device.set_index(1),
        Err(DeviceError::InvalidCpuIndex { index: 1 })
    );
    assert_eq!(device.index(), 0);

    device.set_index(-1).unwrap();
    assert_eq!(device, Device::cpu());
}
