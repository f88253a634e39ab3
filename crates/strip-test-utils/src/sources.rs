//! Canned source files.
//!
//! Each constant comes with the text a production build must produce from
//! it under the default configuration.

/// A module using every region syntax of the default family.
pub const APP_JS: &str = "\
import { api } from './api';
/* BUILD_REMOVE_START */
import { mock } from './mock';
/* BUILD_REMOVE_END */

export function load(id) {
  console.log('load', id); // BUILD_REMOVE
  // BUILD_REMOVE_START
  mock.install();
  // BUILD_REMOVE_END
  return api.get(id);
}
";

/// [`APP_JS`] after a production build.
pub const APP_JS_PRODUCTION: &str = "\
import { api } from './api';

export function load(id) {
  return api.get(id);
}
";

/// A module whose only marker is inline.
pub const INLINE_TS: &str =
    "export const flags = { verbose: /* BUILD_REMOVE_START */ true || /* BUILD_REMOVE_END */ false };\n";

/// [`INLINE_TS`] after a production build.
pub const INLINE_TS_PRODUCTION: &str = "export const flags = { verbose: false };\n";

/// A module with a start marker that is never closed.
pub const UNTERMINATED_JS: &str = "\
run();
/* BUILD_REMOVE_START */
debug();
";

/// A module without markers.
pub const PLAIN_JS: &str = "export const answer = 42;\n";
