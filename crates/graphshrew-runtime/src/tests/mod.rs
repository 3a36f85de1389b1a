//! Test modules for graphshrew-runtime
//!
//! Guest modules used here are written in WAT. [`ARENA_FIELDS`] is the smallest
//! module the codec can bind to: a memory and a bump allocator that traps
//! on requests that are not powers of two and remembers the last size it
//! was asked for.

use wasmtime::{Engine, Instance, Module, Store, Val};

use crate::abi::Abi;


/// Memory, heap and allocator shared by every test guest.
pub const ARENA_FIELDS: &str = r#"
  (memory (export "memory") 1)
  (global $heap (mut i32) (i32.const 1024))
  (global $last (export "last_size") (mut i32) (i32.const 0))
  (func $allocate (export "memory.allocate") (param $size i32) (result i32)
    (local $ptr i32)
    (if (i32.ne (i32.and (local.get $size) (i32.sub (local.get $size) (i32.const 1)))
                (i32.const 0))
      (then unreachable))
    (global.set $last (local.get $size))
    (local.set $ptr (global.get $heap))
    (global.set $heap (i32.add (global.get $heap) (local.get $size)))
    (block $done
      (loop $grow
        (br_if $done
          (i32.le_u (global.get $heap) (i32.mul (memory.size) (i32.const 65536))))
        (if (i32.eq (memory.grow (i32.const 1)) (i32.const -1))
          (then unreachable))
        (br $grow)))
    (local.get $ptr))
"#;

/// A guest module: `imports`, then the arena, then `body`.
pub fn guest(imports: &str, body: &str) -> String {
    format!("(module\n{}\n{}\n{})", imports, ARENA_FIELDS, body)
}

pub fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// A store holding an instantiated arena and a codec bound to it.
pub struct Arena {
    pub store: Store<()>,
    pub instance: Instance,
    pub abi: Abi,
}

impl Arena {
    pub fn new() -> Self {
        let engine = Engine::default();
        let module = Module::new(&engine, guest("", "")).unwrap();
        let mut store = Store::new(&engine, ());
        let instance = Instance::new(&mut store, &module, &[]).unwrap();
        let memory = instance.get_memory(&mut store, "memory").unwrap();
        let allocator = instance
            .get_typed_func::<u32, u32>(&mut store, "memory.allocate")
            .unwrap();
        Arena {
            store,
            instance,
            abi: Abi::new(memory, allocator),
        }
    }

    pub fn last_size(&mut self) -> i32 {
        match self
            .instance
            .get_global(&mut self.store, "last_size")
            .unwrap()
            .get(&mut self.store)
        {
            Val::I32(size) => size,
            other => panic!("unexpected global {:?}", other),
        }
    }

    /// Copy `bytes` into a fresh allocation, bypassing the typed writers.
    pub fn poke(&mut self, bytes: &[u8]) -> u32 {
        let ptr = self.abi.allocate(&mut self.store, bytes.len().max(1)).unwrap();
        self.abi.memory().write(&mut self.store, ptr as usize, bytes).unwrap();
        ptr
    }

    pub fn words(&mut self, words: &[u32]) -> u32 {
        let bytes: Vec<u8> = words.iter().flat_map(|w| w.to_le_bytes()).collect();
        self.poke(&bytes)
    }
}
