//! Shared class-string helpers for consistent styling across pages.

pub const BTN_PRIMARY: &str =
    "rounded-lg bg-sky-500 px-4 py-2 text-sm font-semibold text-white hover:bg-sky-400";

pub const BTN_SECONDARY: &str =
    "rounded-lg border border-slate-700 px-4 py-2 text-sm text-slate-300 hover:border-sky-600 hover:text-sky-300";

pub const BTN_DANGER: &str =
    "rounded px-2 py-1 text-xs text-rose-300 border border-slate-700 hover:border-rose-500";

pub const BTN_SMALL: &str =
    "rounded px-2 py-1 text-xs text-slate-400 border border-slate-700 hover:border-sky-600 hover:text-sky-300";

pub const INPUT: &str =
    "rounded-lg border border-slate-700 bg-slate-900 px-3 py-2 text-sm text-slate-100 focus:border-sky-500 focus:outline-none";

pub const SELECT: &str =
    "rounded-lg border border-slate-700 bg-slate-900 px-3 py-2 text-sm text-slate-100";

pub const CARD: &str = "rounded-xl border border-slate-800 bg-slate-900 p-6";

pub const LABEL: &str = "text-xs uppercase tracking-wide text-slate-500";

pub const TABLE_HEAD: &str = "text-left text-xs uppercase tracking-wide text-slate-500";

pub const TABLE_ROW: &str = "border-b border-slate-800 text-sm text-slate-200";
