mod mock_file_system_spec;
