//! The canonical fun facts loaded by `fifty-server seed`.

use fifty_core::state::StateCode;

const SEED: &[(&str, [&str; 3])] = &[
  ("KS", [
    "State flower - sunflower",
    "State rock - jelenite",
    "State animal - American bison",
  ]),
  ("MO", [
    "State flower - hawthorn",
    "State rock - mozarkite",
    "State animal - Missouri mule",
  ]),
  ("OK", [
    "State flower - mistletoe",
    "State rock - barite rose",
    "State animal - American bison",
  ]),
  ("NE", [
    "State flower - goldenrod",
    "State rock - blue agate",
    "State animal - white-tailed deer",
  ]),
  ("CO", [
    "State flower - Rocky Mountain columbine",
    "State rock - aquamarine",
    "State animal - Rocky Mountain bighorn sheep",
  ]),
];

pub fn entries() -> fifty_core::Result<Vec<(StateCode, Vec<String>)>> {
  SEED
    .iter()
    .map(|(code, facts)| -> fifty_core::Result<_> {
      Ok((
        StateCode::parse(code)?,
        facts.iter().map(|f| f.to_string()).collect(),
      ))
    })
    .collect()
}
