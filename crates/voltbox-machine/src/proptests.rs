use proptest::prelude::*;

use crate::{Disk, Ram};

#[derive(Debug, Clone)]
enum Op {
    Reserve(u64),
    Release(u64),
}

const CAPACITY: u64 = 4096;
const MAX_OPS: usize = 64;

fn op_strategy() -> impl Strategy<Value = Op> {
    // Amounts past capacity keep the rejection path hot.
    prop_oneof![
        (0u64..=2 * CAPACITY).prop_map(Op::Reserve),
        (0u64..=2 * CAPACITY).prop_map(Op::Release),
    ]
}

proptest! {
    #[test]
    fn ram_usage_stays_in_bounds(ops in proptest::collection::vec(op_strategy(), 0..MAX_OPS)) {
        let mut ram = Ram::new(CAPACITY);
        for op in ops {
            let before = ram.used();
            match op {
                Op::Reserve(n) => {
                    let fits = before + n <= CAPACITY;
                    let result = ram.alloc(n);
                    prop_assert_eq!(result.is_ok(), fits);
                    if result.is_err() {
                        prop_assert_eq!(ram.used(), before);
                    }
                }
                Op::Release(n) => {
                    ram.free(n);
                    prop_assert_eq!(ram.used(), before.saturating_sub(n));
                }
            }
            prop_assert!(ram.used() <= CAPACITY);
        }
    }

    #[test]
    fn disk_usage_stays_in_bounds(ops in proptest::collection::vec(op_strategy(), 0..MAX_OPS)) {
        let mut disk = Disk::new(CAPACITY);
        for op in ops {
            let before = disk.used();
            match op {
                Op::Reserve(n) => {
                    let fits = before + n <= CAPACITY;
                    let result = disk.write(n);
                    prop_assert_eq!(result.is_ok(), fits);
                    if result.is_err() {
                        prop_assert_eq!(disk.used(), before);
                    }
                }
                Op::Release(n) => {
                    disk.delete(n);
                    prop_assert_eq!(disk.used(), before.saturating_sub(n));
                }
            }
            prop_assert!(disk.used() <= CAPACITY);
        }
    }
}
