mod read_commit_author_offsets;
