//! Linking the `env`, `index` and `ethereum` host imports

use std::sync::{Arc, Mutex};

use anyhow::{anyhow, Context, Result};
use graphshrew_support::convert::to_hex;
use graphshrew_support::error::Error;
use wasmtime::{Caller, Linker};

use crate::abi::Abi;
use crate::context::HostContext;
use crate::host::{self, BigIntOp};
use crate::runtime::{lock_err, State};

fn abi(caller: &Caller<'_, State>) -> Result<Abi> {
    Ok(caller.data().abi.clone().ok_or(Error::AbiNotInitialized)?)
}

pub fn setup_linker(context: Arc<Mutex<HostContext>>, linker: &mut Linker<State>) -> Result<()> {
    setup_env(context.clone(), linker)?;
    setup_index(context.clone(), linker)?;
    setup_ethereum(context, linker)?;
    Ok(())
}

fn setup_env(context: Arc<Mutex<HostContext>>, linker: &mut Linker<State>) -> Result<()> {
    linker
        .func_wrap(
            "env",
            "abort",
            |caller: Caller<'_, State>, message: u32, file: u32, line: u32, column: u32| -> Result<()> {
                let abi = abi(&caller)?;
                let message = abi.read_optional_string(&caller, message)?;
                let file = abi.read_optional_string(&caller, file)?;
                Err(host::abort(message, file, line, column).into())
            },
        )
        .map_err(|e| anyhow!("Failed to wrap abort: {:?}", e))?;

    linker
        .func_wrap(
            "env",
            "trace",
            move |caller: Caller<'_, State>,
                  message: u32,
                  n: i32,
                  a0: f64,
                  a1: f64,
                  a2: f64,
                  a3: f64,
                  a4: f64|
                  -> Result<()> {
                let message = abi(&caller)?
                    .read_string(&caller, message)
                    .context("decoding trace message")?;
                let args = [a0, a1, a2, a3, a4];
                let n = n.clamp(0, args.len() as i32) as usize;
                let mut context = context.lock().map_err(lock_err)?;
                context.trace(&message, &args[..n])
            },
        )
        .map_err(|e| anyhow!("Failed to wrap trace: {:?}", e))?;

    Ok(())
}

fn setup_index(context: Arc<Mutex<HostContext>>, linker: &mut Linker<State>) -> Result<()> {
    for op in BigIntOp::ALL {
        linker
            .func_wrap(
                "index",
                op.import_name(),
                move |mut caller: Caller<'_, State>, x: u32, y: u32| -> Result<u32> {
                    let abi = abi(&caller)?;
                    let x = abi.read_big_int(&caller, x)?;
                    let y = abi.read_big_int(&caller, y)?;
                    let result = op
                        .apply(&x, &y)
                        .with_context(|| format!("{} {} {}", op.import_name(), x, y))?;
                    Ok(abi.write_big_int(&mut caller, &result)?)
                },
            )
            .map_err(|e| anyhow!("Failed to wrap {}: {:?}", op.import_name(), e))?;
    }

    linker
        .func_wrap(
            "index",
            "bigInt.pow",
            |mut caller: Caller<'_, State>, x: u32, exponent: i32| -> Result<u32> {
                let abi = abi(&caller)?;
                let x = abi.read_big_int(&caller, x)?;
                let result = host::pow(&x, exponent)?;
                Ok(abi.write_big_int(&mut caller, &result)?)
            },
        )
        .map_err(|e| anyhow!("Failed to wrap bigInt.pow: {:?}", e))?;

    linker
        .func_wrap(
            "index",
            "log.log",
            |caller: Caller<'_, State>, level: i32, message: u32| -> Result<()> {
                let message = abi(&caller)?.read_string(&caller, message)?;
                Ok(host::log(level, message)?)
            },
        )
        .map_err(|e| anyhow!("Failed to wrap log.log: {:?}", e))?;

    let context_get = context.clone();
    linker
        .func_wrap(
            "index",
            "store.get",
            move |mut caller: Caller<'_, State>, entity_type: u32, id: u32| -> Result<u32> {
                let abi = abi(&caller)?;
                let entity_type = abi.read_string(&caller, entity_type).context("store.get entity type")?;
                let id = abi.read_string(&caller, id).context("store.get id")?;
                let entity = context_get.lock().map_err(lock_err)?.store.get(&entity_type, &id);
                log::debug!("store.get {} {} -> {}", entity_type, id, entity.is_some());
                match entity {
                    Some(entity) => Ok(abi
                        .write_entity(&mut caller, &entity)
                        .with_context(|| format!("encoding {} {}", entity_type, id))?),
                    None => Ok(0),
                }
            },
        )
        .map_err(|e| anyhow!("Failed to wrap store.get: {:?}", e))?;

    let context_set = context.clone();
    linker
        .func_wrap(
            "index",
            "store.set",
            move |caller: Caller<'_, State>, entity_type: u32, id: u32, data: u32| -> Result<()> {
                let abi = abi(&caller)?;
                let entity_type = abi.read_string(&caller, entity_type).context("store.set entity type")?;
                let id = abi.read_string(&caller, id).context("store.set id")?;
                let entity = abi
                    .read_entity(&caller, data)
                    .with_context(|| format!("decoding {} {} for store.set", entity_type, id))?;
                log::debug!("store.set {} {} ({} entries)", entity_type, id, entity.len());
                context_set
                    .lock()
                    .map_err(lock_err)?
                    .store
                    .set(&entity_type, &id, entity);
                Ok(())
            },
        )
        .map_err(|e| anyhow!("Failed to wrap store.set: {:?}", e))?;

    let context_remove = context;
    linker
        .func_wrap(
            "index",
            "store.remove",
            move |caller: Caller<'_, State>, entity_type: u32, id: u32| -> Result<()> {
                let abi = abi(&caller)?;
                let entity_type = abi.read_string(&caller, entity_type).context("store.remove entity type")?;
                let id = abi.read_string(&caller, id).context("store.remove id")?;
                log::debug!("store.remove {} {}", entity_type, id);
                context_remove
                    .lock()
                    .map_err(lock_err)?
                    .store
                    .remove(&entity_type, &id);
                Ok(())
            },
        )
        .map_err(|e| anyhow!("Failed to wrap store.remove: {:?}", e))?;

    linker
        .func_wrap(
            "index",
            "typeConversion.bigIntToString",
            |mut caller: Caller<'_, State>, x: u32| -> Result<u32> {
                let abi = abi(&caller)?;
                let x = abi.read_big_int(&caller, x)?;
                Ok(abi.write_string(&mut caller, &host::big_int_to_string(&x))?)
            },
        )
        .map_err(|e| anyhow!("Failed to wrap typeConversion.bigIntToString: {:?}", e))?;

    linker
        .func_wrap(
            "index",
            "typeConversion.bytesToHex",
            |mut caller: Caller<'_, State>, bytes: u32| -> Result<u32> {
                let abi = abi(&caller)?;
                let bytes = abi.read_bytes(&caller, bytes)?;
                Ok(abi.write_string(&mut caller, &to_hex(&bytes))?)
            },
        )
        .map_err(|e| anyhow!("Failed to wrap typeConversion.bytesToHex: {:?}", e))?;

    Ok(())
}

fn setup_ethereum(context: Arc<Mutex<HostContext>>, linker: &mut Linker<State>) -> Result<()> {
    linker
        .func_wrap(
            "ethereum",
            "ethereum.call",
            move |mut caller: Caller<'_, State>, call: u32| -> Result<u32> {
                let abi = abi(&caller)?;
                let call = abi.read_call(&caller, call).context("decoding ethereum.call")?;
                log::debug!(
                    "ethereum.call {}.{} ({})",
                    call.contract_name,
                    call.function_name,
                    call.function_signature
                );
                let result = context.lock().map_err(lock_err)?.call(&call)?;
                match result {
                    Some(values) => Ok(abi
                        .write_ethereum_values(&mut caller, &values)
                        .with_context(|| format!("encoding result of {}", call.function_signature))?),
                    None => Ok(0),
                }
            },
        )
        .map_err(|e| anyhow!("Failed to wrap ethereum.call: {:?}", e))?;

    Ok(())
}
