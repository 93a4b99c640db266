mod llm_service_test;
