mod entries_built_three_ways_agree;
mod resolve_nested_tree_lazily;
mod resolve_submodule_entry_without_commit;
