use delve_engine::api::{simulate_battle, simulate_battle_many, BattleConfig};
use delve_engine::{roll_damage, DamageRange, Dice, Weapon};
use jni::objects::{JClass, JString};
use jni::sys::{jint, jlong, jstring};
use jni::JNIEnv;
use serde::Deserialize;
use serde_json::json;

const DEFAULT_SAMPLES: u32 = 100;

fn default_samples() -> u32 {
    DEFAULT_SAMPLES
}

#[derive(Deserialize)]
struct ManyRequest {
    #[serde(default = "default_samples")]
    samples: u32,
    #[serde(flatten)]
    config: BattleConfig,
}

fn to_jstring(env: &JNIEnv, s: String) -> jstring {
    env.new_string(s)
        .map(|s| s.into_raw())
        .unwrap_or(std::ptr::null_mut())
}

fn ok_payload(value: serde_json::Value) -> String {
    json!({ "ok": true, "result": value }).to_string()
}

fn err_payload(e: impl std::fmt::Display) -> String {
    json!({ "ok": false, "error": e.to_string() }).to_string()
}

fn read_input(env: &mut JNIEnv, json: &JString) -> Result<String, String> {
    env.get_string(json).map(Into::into).map_err(err_payload)
}

/// Run one battle from a JSON `BattleConfig`; always answers with an
/// `{"ok": ..}` envelope.
pub fn simulate_battle_json(input: &str) -> String {
    let cfg: BattleConfig = match serde_json::from_str(input) {
        Ok(c) => c,
        Err(e) => return err_payload(format!("invalid_config: {}", e)),
    };
    match simulate_battle(cfg).and_then(|r| Ok(serde_json::to_value(r)?)) {
        Ok(v) => ok_payload(v),
        Err(e) => err_payload(format!("{:#}", e)),
    }
}

/// Like [`simulate_battle_json`] with an extra top-level `samples` field.
pub fn simulate_battle_many_json(input: &str) -> String {
    let req: ManyRequest = match serde_json::from_str(input) {
        Ok(r) => r,
        Err(e) => return err_payload(format!("invalid_config: {}", e)),
    };
    match simulate_battle_many(req.config, req.samples).and_then(|s| Ok(serde_json::to_value(s)?)) {
        Ok(v) => ok_payload(v),
        Err(e) => err_payload(format!("{:#}", e)),
    }
}

/// One seeded damage roll in `min..=max`.
pub fn roll_internal(seed: i64, min: i32, max: i32) -> i32 {
    let weapon = Weapon::new("roll", "natural", DamageRange::new(min, max), 0);
    roll_damage(&mut Dice::from_seed(seed as u64), &weapon)
}

#[no_mangle]
pub extern "system" fn Java_com_delve_Ffi_version<'local>(
    env: JNIEnv<'local>,
    _class: JClass<'local>,
) -> jstring {
    to_jstring(&env, format!("delve-ffi {}", env!("CARGO_PKG_VERSION")))
}

#[no_mangle]
pub extern "system" fn Java_com_delve_Ffi_rollDamage(
    _env: JNIEnv<'_>,
    _class: JClass<'_>,
    seed: jlong,
    min: jint,
    max: jint,
) -> jint {
    roll_internal(seed, min, max)
}

#[no_mangle]
pub extern "system" fn Java_com_delve_Ffi_simulateBattleJson(
    mut env: JNIEnv,
    _class: JClass,
    json: JString,
) -> jstring {
    let payload = match read_input(&mut env, &json) {
        Ok(input) => simulate_battle_json(&input),
        Err(e) => e,
    };
    to_jstring(&env, payload)
}

#[no_mangle]
pub extern "system" fn Java_com_delve_Ffi_simulateBattleManyJson(
    mut env: JNIEnv,
    _class: JClass,
    json: JString,
) -> jstring {
    let payload = match read_input(&mut env, &json) {
        Ok(input) => simulate_battle_many_json(&input),
        Err(e) => e,
    };
    to_jstring(&env, payload)
}
