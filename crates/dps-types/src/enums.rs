// ── Macro for code-mapped enum boilerplate ────────────────────────────
//
// Every enum in this module follows the same pattern: a fixed set of
// named variants, each mapped to one vendor integer code and one
// lower-case label, plus a conversion triple (code / from_code / label).
// The macro eliminates the repetition while keeping each enum's doc
// comments and derive list explicit at the call site.

macro_rules! code_enum {
  (
    $(#[$meta:meta])*
    pub enum $name:ident {
      $( $(#[$vmeta:meta])* $variant:ident = $code:literal => $label:literal ),+ $(,)?
    }
  ) => {
    $(#[$meta])*
    pub enum $name {
      $( $(#[$vmeta])* $variant ),+
    }

    impl $name {
      /// Enum name used in unmapped-code diagnostics.
      pub const NAME: &'static str = stringify!($name);

      /// The vendor integer code for this variant.
      #[must_use]
      pub fn code(self) -> i64 {
        match self {
          $( Self::$variant => $code ),+
        }
      }

      /// Map a vendor integer code to a variant.
      ///
      /// Returns `None` for codes outside the documented table — the
      /// caller decides whether that is an `UnknownEnumValue` failure
      /// or something softer.
      #[must_use]
      pub fn from_code(code: i64) -> Option<Self> {
        match code {
          $( $code => Some(Self::$variant), )+
          _ => None,
        }
      }

      /// Lower-case label, the form debugging consumers key on.
      #[must_use]
      pub fn label(self) -> &'static str {
        match self {
          $( Self::$variant => $label ),+
        }
      }
    }

    impl std::fmt::Display for $name {
      fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
      }
    }
  };
}

// ── CleanSpeed ────────────────────────────────────────────────────────

code_enum! {
  /// Suction level codes carried by key `158`.
  ///
  /// ```text
  /// ┌──────┬──────────┐
  /// │ Code │ Speed    │
  /// ├──────┼──────────┤
  /// │ 0    │ quiet    │
  /// │ 1    │ standard │
  /// │ 2    │ turbo    │
  /// │ 3    │ max      │
  /// └──────┴──────────┘
  /// ```
  ///
  /// The table is closed: codes outside 0–3 have never been observed and
  /// are reported as unmapped rather than guessed at.
  #[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
  #[serde(rename_all = "snake_case")]
  pub enum CleanSpeed {
    Quiet = 0 => "quiet",
    Standard = 1 => "standard",
    Turbo = 2 => "turbo",
    Max = 3 => "max",
  }
}

// ── WorkState ─────────────────────────────────────────────────────────

code_enum! {
  /// Device activity codes carried by key `153`.
  ///
  /// ```text
  /// ┌──────┬──────────────┐
  /// │ Code │ State        │
  /// ├──────┼──────────────┤
  /// │ 0    │ standby      │
  /// │ 1    │ sleep        │
  /// │ 2    │ fault        │
  /// │ 3    │ charging     │
  /// │ 4    │ fast_mapping │
  /// │ 5    │ cleaning     │
  /// │ 6    │ remote_ctrl  │
  /// │ 7    │ go_home      │
  /// │ 8    │ cruising     │
  /// └──────┴──────────────┘
  /// ```
  #[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
  #[serde(rename_all = "snake_case")]
  pub enum WorkState {
    Standby = 0 => "standby",
    Sleep = 1 => "sleep",
    Fault = 2 => "fault",
    Charging = 3 => "charging",
    FastMapping = 4 => "fast_mapping",
    Cleaning = 5 => "cleaning",
    RemoteCtrl = 6 => "remote_ctrl",
    GoHome = 7 => "go_home",
    Cruising = 8 => "cruising",
  }
}

// ── PlayPause ─────────────────────────────────────────────────────────

code_enum! {
  /// Run/pause toggle carried by key `152`.
  ///
  /// Older firmwares send this as a bool, newer ones as a 0/1 code; the
  /// decoder coerces bools through [`RawValue::as_code`] before hitting
  /// this table, so both shapes land here.
  ///
  /// [`RawValue::as_code`]: crate::raw::RawValue::as_code
  #[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
  #[serde(rename_all = "snake_case")]
  pub enum PlayPause {
    Paused = 0 => "paused",
    Playing = 1 => "playing",
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn clean_speed_roundtrip() {
    for speed in [
      CleanSpeed::Quiet,
      CleanSpeed::Standard,
      CleanSpeed::Turbo,
      CleanSpeed::Max,
    ] {
      assert_eq!(CleanSpeed::from_code(speed.code()), Some(speed));
    }
  }

  #[test]
  fn clean_speed_rejects_unmapped_codes() {
    assert_eq!(CleanSpeed::from_code(4), None);
    assert_eq!(CleanSpeed::from_code(-1), None);
    assert_eq!(CleanSpeed::from_code(255), None);
  }

  #[test]
  fn work_state_full_table() {
    assert_eq!(WorkState::from_code(0), Some(WorkState::Standby));
    assert_eq!(WorkState::from_code(5), Some(WorkState::Cleaning));
    assert_eq!(WorkState::from_code(8), Some(WorkState::Cruising));
    assert_eq!(WorkState::from_code(9), None);
  }

  #[test]
  fn labels_are_lowercase_snake() {
    assert_eq!(WorkState::FastMapping.label(), "fast_mapping");
    assert_eq!(WorkState::RemoteCtrl.to_string(), "remote_ctrl");
    assert_eq!(CleanSpeed::Turbo.label(), "turbo");
    assert_eq!(PlayPause::Playing.label(), "playing");
  }

  #[test]
  fn serializes_as_label() {
    let json = serde_json::to_string(&WorkState::GoHome).unwrap();
    assert_eq!(json, "\"go_home\"");
    let json = serde_json::to_string(&CleanSpeed::Quiet).unwrap();
    assert_eq!(json, "\"quiet\"");
  }
}
