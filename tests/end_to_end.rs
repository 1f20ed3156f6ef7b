//! Full runs against a backing-store file on disk.

use std::io::Write;

use demand_paging::io::AddressReader;
use demand_paging::{FileBackingStore, PolicyKind, VmConfig, VmError, VmManager};
use tempfile::NamedTempFile;

/// 256 pages of 256 bytes; byte at logical address `a` is `(a * 7) as u8`
fn backing_store_file() -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("temp file");
    let data: Vec<u8> = (0..256 * 256u32).map(|a| (a * 7) as u8).collect();
    file.write_all(&data).expect("write backing store");
    file.flush().expect("flush");
    file
}

fn address_file(lines: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("temp file");
    file.write_all(lines.as_bytes()).expect("write addresses");
    file.flush().expect("flush");
    file
}

fn expected(address: u32) -> i8 {
    (address * 7) as u8 as i8
}

type Run = (Vec<i8>, VmManager<FileBackingStore>);

fn run(
    config: VmConfig,
    store: &NamedTempFile,
    addresses: &NamedTempFile,
) -> Result<Run, VmError> {
    let store = FileBackingStore::open(store.path(), config.page_size)?;
    let mut vm = VmManager::new(config, store)?;
    let mut values = Vec::new();
    for raw in AddressReader::open(addresses.path())? {
        values.push(vm.translate(raw?)?.value);
    }
    Ok((values, vm))
}

#[test]
fn test_reference_addresses() {
    let store = backing_store_file();
    let addrs = [16916u32, 62493, 30198, 53683, 40185, 28781, 24462, 48399, 64815, 18295];
    let input: String = addrs.iter().map(|a| format!("{a}\n")).collect();
    let addresses = address_file(&input);

    let (values, vm) = run(VmConfig::default(), &store, &addresses).unwrap();

    let want: Vec<i8> = addrs.iter().map(|&a| expected(a)).collect();
    assert_eq!(values, want);
    let stats = vm.statistics();
    assert_eq!(stats.translations, 10);
    assert_eq!(stats.page_faults, 10);
    assert_eq!(stats.tlb_hits, 0);
}

#[test]
fn test_sequential_sweep_under_pressure() {
    // touch every page twice in order: with 64 frames and FIFO, the second
    // sweep faults on every page again
    let store = backing_store_file();
    let mut input = String::new();
    for _ in 0..2 {
        for page in 0..256u32 {
            input.push_str(&format!("{}\n", (page << 8) | (page % 256)));
        }
    }
    let addresses = address_file(&input);

    let (values, vm) = run(VmConfig::default(), &store, &addresses).unwrap();

    assert_eq!(values.len(), 512);
    for (i, page) in (0..2).flat_map(|_| 0..256u32).enumerate() {
        assert_eq!(values[i], expected((page << 8) | page));
    }
    let stats = vm.statistics();
    assert_eq!(stats.page_faults, 512);
    assert_eq!(stats.evictions, 512 - 64);
    assert_eq!(vm.page_table().mapped_count(), 64);
}

#[test]
fn test_unconstrained_second_sweep_only_hits() {
    let store = backing_store_file();
    let mut input = String::new();
    for _ in 0..2 {
        for page in 0..256u32 {
            input.push_str(&format!("{}\n", page << 8));
        }
    }
    let addresses = address_file(&input);

    let (_, vm) = run(VmConfig::unconstrained(), &store, &addresses).unwrap();

    let stats = vm.statistics();
    assert_eq!(stats.page_faults, 256);
    assert_eq!(stats.evictions, 0);
    // TLB only remembers the last 16 pages, the rest come from the page table
    assert_eq!(stats.tlb_hits, 0);
    assert_eq!(vm.page_table().mapped_count(), 256);
}

#[test]
fn test_invalid_address_line_aborts() {
    let store = backing_store_file();
    let addresses = address_file("256\nnot-a-number\n512\n");

    let err = run(VmConfig::default(), &store, &addresses).err();
    assert!(matches!(err, Some(VmError::InvalidAddress { line: 2, .. })));
}

#[test]
fn test_out_of_range_address_aborts() {
    let store = backing_store_file();
    let addresses = address_file("65535\n65536\n");

    let err = run(VmConfig::default(), &store, &addresses).err();
    assert!(matches!(
        err,
        Some(VmError::AddressOutOfRange { address: 65536, page: 256, .. })
    ));
}

#[test]
fn test_truncated_backing_store_aborts() {
    let mut store = NamedTempFile::new().unwrap();
    store.write_all(&[1u8; 256 * 3 + 100]).unwrap();
    store.flush().unwrap();
    let addresses = address_file(&format!("{}\n{}\n", 2 << 8, 3 << 8));

    let err = run(VmConfig::default(), &store, &addresses).err();
    assert!(matches!(err, Some(VmError::BackingStoreRead { page: 3, .. })));
}

#[test]
fn test_noop_policy_refused_at_startup() {
    let store = backing_store_file();
    let addresses = address_file("0\n");
    let config = VmConfig::default().with_policy(PolicyKind::Noop);

    let err = run(config, &store, &addresses).err();
    assert!(matches!(err, Some(VmError::Config(_))));
}
